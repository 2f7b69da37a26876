//! Loading structure descriptions from YAML documents.

mod description;
mod duplicates;

pub use description::{DescriptionError, StructureDescription};
