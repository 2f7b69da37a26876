use std::path::{Component, Path, PathBuf};

use snafu::prelude::*;

use super::{Container, Node};

#[derive(Debug, Snafu)]
pub enum StructuralError {
    #[snafu(display("An entry in '/{}' has an empty name", parent.display()))]
    EmptyName { parent: PathBuf },
    #[snafu(display(
        "Entry name {:?} in '/{}' is not a single path segment",
        name,
        parent.display()
    ))]
    InvalidName { name: String, parent: PathBuf },
}

/// Checks that `name` can only ever address a direct child of `parent`.
pub fn validate_name(name: &str, parent: &Path) -> Result<(), StructuralError> {
    ensure!(
        !name.is_empty(),
        EmptyNameSnafu {
            parent: parent.to_path_buf()
        }
    );

    let has_reserved_chars = name.contains(['/', '\\', '\0']);
    let mut components = Path::new(name).components();
    let is_single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(segment)), None) if segment == name
    );

    ensure!(
        is_single_normal && !has_reserved_chars,
        InvalidNameSnafu {
            name,
            parent: parent.to_path_buf()
        }
    );
    Ok(())
}

impl Container {
    /// Validates every name in the tree without touching the filesystem.
    ///
    /// Entries are visited in pre-order, so the reported name is the first
    /// invalid one materialization would have reached.
    pub fn validate(&self) -> Result<(), StructuralError> {
        let mut frontier = vec![(PathBuf::new(), self.iter())];

        while let Some((parent, entries)) = frontier.last_mut() {
            let Some((name, node)) = entries.next() else {
                frontier.pop();
                continue;
            };
            validate_name(name, parent)?;
            if let Node::Container(child) = node {
                let child_path = parent.join(name);
                frontier.push((child_path, child.iter()));
            }
        }

        Ok(())
    }
}
