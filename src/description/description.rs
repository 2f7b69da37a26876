use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::duplicates::find_duplicate_key;
use crate::{
    ext::PathDisplayExt,
    structure::{Container, Node},
};

/// Reads structure descriptions from YAML files.
///
/// Maps become directories, strings become files with that content, and an
/// empty value (`name:` or `name: {}`) becomes a directory with no declared
/// children.
pub struct StructureDescription;

impl StructureDescription {
    pub async fn read(path: &Path) -> Result<Container, DescriptionError> {
        debug!("Reading description file: {}", path.display_best_effort());
        let bytes = fs::read(path).await.context(ReadSnafu {
            file_path: path.display_best_effort(),
        })?;
        debug!("Successfully read description file: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(NotUtf8Snafu {
            file_path: path.display_best_effort(),
        })?;
        contents.as_str().try_into()
    }

    fn container_from_mapping(
        mapping: &LinkedHashMap<Yaml, Yaml>,
        path: &Path,
    ) -> Result<Container, DescriptionError> {
        let mut container = Container::new();

        for (key, value) in mapping {
            let name = key.as_str().context(InvalidKeySnafu {
                parent: path.to_path_buf(),
            })?;
            let entry_path = path.join(name);
            let node = Self::node_from_yaml(value, &entry_path)?;
            container.insert(name, node);
        }

        Ok(container)
    }

    fn node_from_yaml(value: &Yaml, path: &Path) -> Result<Node, DescriptionError> {
        if let Some(mapping) = value.as_mapping() {
            return Self::container_from_mapping(mapping, path).map(Node::Container);
        }
        if let Some(content) = value.as_str() {
            return Ok(Node::Leaf(content.to_string()));
        }
        if matches!(value, Yaml::Value(Scalar::Null)) {
            return Ok(Node::Container(Container::new()));
        }

        debug!("Unsupported value at '/{}': {:?}", path.display(), value);
        UnsupportedValueSnafu {
            path: path.to_path_buf(),
        }
        .fail()
    }
}

impl TryFrom<&str> for Container {
    type Error = DescriptionError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents.first().context(MalformedDescriptionSnafu)?;
        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;

        if let Some(path) = find_duplicate_key(contents).context(ParseSnafu)? {
            return DuplicateNameSnafu { path }.fail();
        }

        StructureDescription::container_from_mapping(top_level, Path::new(""))
    }
}

#[derive(Debug, Snafu)]
pub enum DescriptionError {
    #[snafu(display("Failed to read the description file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("The description file {} is not valid UTF-8", file_path))]
    NotUtf8 {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the description file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("The description file contains no document"))]
    MalformedDescription,
    #[snafu(display("Top level of the description should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Entry names in '/{}' should be strings", parent.display()))]
    InvalidKey { parent: PathBuf },
    #[snafu(display("Entry '/{}' should be a map, a string or empty", path.display()))]
    UnsupportedValue { path: PathBuf },
    #[snafu(display("Entry '/{}' is defined multiple times", path.display()))]
    DuplicateName { path: PathBuf },
}
