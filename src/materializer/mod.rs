//! Turns a [`Container`](crate::structure::Container) description into
//! directories and files on disk.
//!
//! [`StructureMaterializer`] is the reference implementation: synchronous,
//! depth-first and pre-order. [`ParallelMaterializer`] produces the same tree
//! while materializing independent sibling directories on worker threads.

mod entry;
mod error;
mod materializer;
mod parallel;
mod report;

pub use entry::PLACEHOLDER_FILE_NAME;
pub use error::MaterializeError;
pub use materializer::{ErrorPolicy, StructureMaterializer, materialize};
pub use parallel::ParallelMaterializer;
pub use report::MaterializeReport;
