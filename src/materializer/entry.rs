use std::fs;
use std::path::Path;

use snafu::prelude::*;
use tracing::debug;

use super::error::{CreateDirSnafu, KindMismatchSnafu, MaterializeError, WriteFileSnafu};
use crate::structure::{EntryKind, Node};

/// Marker written into directories materialized from an empty container.
pub const PLACEHOLDER_FILE_NAME: &str = ".keep";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum EntryOutcome {
    File,
    /// A directory whose children still have to be materialized.
    Directory,
    /// A directory holding only the placeholder marker.
    EmptyDirectory,
}

/// Materializes `node` at `path` without descending into its children.
pub(super) fn materialize_entry(
    path: &Path,
    node: &Node,
) -> Result<EntryOutcome, MaterializeError> {
    debug!("Materializing {} {}", node.kind(), path.display());
    match node {
        Node::Leaf(content) => {
            write_file(path, content)?;
            Ok(EntryOutcome::File)
        }
        Node::Container(container) => {
            ensure_directory(path)?;
            if container.is_empty() {
                write_file(&path.join(PLACEHOLDER_FILE_NAME), "")?;
                Ok(EntryOutcome::EmptyDirectory)
            } else {
                Ok(EntryOutcome::Directory)
            }
        }
    }
}

/// Creates `path` and its missing ancestors. An existing directory is fine,
/// anything else already sitting at `path` is an error.
pub(super) fn ensure_directory(path: &Path) -> Result<(), MaterializeError> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => {
            debug!("Directory {} already exists", path.display());
            return Ok(());
        }
        Ok(_) => {
            return KindMismatchSnafu {
                path: path.to_path_buf(),
                expected: EntryKind::Directory,
            }
            .fail();
        }
        Err(_) => {}
    }

    debug!("Creating directory {}", path.display());
    fs::create_dir_all(path).context(CreateDirSnafu {
        path: path.to_path_buf(),
    })
}

/// Creates or truncates the file at `path` and writes `content` verbatim.
fn write_file(path: &Path, content: &str) -> Result<(), MaterializeError> {
    ensure!(
        !path.is_dir(),
        KindMismatchSnafu {
            path: path.to_path_buf(),
            expected: EntryKind::File,
        }
    );

    debug!("Writing {} bytes to {}", content.len(), path.display());
    fs::write(path, content).context(WriteFileSnafu {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::structure::Container;

    #[test]
    fn leaf_overwrites_existing_content() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("file.txt");
        fs::write(&path, "a much longer previous content").unwrap();

        let outcome = materialize_entry(&path, &Node::from("short")).unwrap();

        assert_eq!(outcome, EntryOutcome::File);
        assert_eq!(fs::read_to_string(&path).unwrap(), "short");
    }

    #[test]
    fn empty_container_gets_placeholder() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("empty");

        let outcome = materialize_entry(&path, &Container::new().into()).unwrap();

        assert_eq!(outcome, EntryOutcome::EmptyDirectory);
        let placeholder = path.join(PLACEHOLDER_FILE_NAME);
        assert_eq!(fs::read(placeholder).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn non_empty_container_only_creates_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("dir");
        let node = Node::from(Container::new().with("child.txt", "x"));

        let outcome = materialize_entry(&path, &node).unwrap();

        assert_eq!(outcome, EntryOutcome::Directory);
        assert!(path.is_dir());
        assert_eq!(fs::read_dir(&path).unwrap().count(), 0);
    }

    #[test]
    fn ensure_directory_creates_missing_ancestors() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("a").join("b").join("c");

        ensure_directory(&path).unwrap();
        ensure_directory(&path).unwrap();

        assert!(path.is_dir());
    }

    #[test]
    fn file_in_place_of_directory_is_a_kind_mismatch() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("taken");
        fs::write(&path, "i am a file").unwrap();

        let result = materialize_entry(&path, &Container::new().into());

        assert!(matches!(
            result,
            Err(MaterializeError::KindMismatch {
                expected: EntryKind::Directory,
                ..
            })
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "i am a file");
    }

    #[test]
    fn directory_in_place_of_file_is_a_kind_mismatch() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("taken");
        fs::create_dir(&path).unwrap();

        let result = materialize_entry(&path, &Node::from("content"));

        match result {
            Err(MaterializeError::KindMismatch { path: reported, expected }) => {
                assert_eq!(reported, path);
                assert_eq!(expected, EntryKind::File);
            }
            other => panic!("Expected KindMismatch, got {other:?}"),
        }
        assert!(path.is_dir());
    }
}
