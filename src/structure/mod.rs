//! In-memory description of a directory tree.
//!
//! A tree is a [`Container`] at the root whose entries are either nested
//! containers (directories) or leaves (files with literal content).

mod node;
mod validation;

pub use node::{Container, EntryKind, Node};
pub use validation::StructuralError;
