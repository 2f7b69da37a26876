use std::error::Error as _;
use std::path::{Path, PathBuf};

use snafu::Snafu;

use crate::structure::{EntryKind, StructuralError};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(super)))]
pub enum MaterializeError {
    #[snafu(display("The structure description is invalid"))]
    InvalidStructure { source: StructuralError },
    #[snafu(display("Failed to create directory {}", path.display()))]
    CreateDirError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to write file {}", path.display()))]
    WriteFileError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display(
        "{} already exists but is not a {}",
        path.display(),
        expected
    ))]
    KindMismatch { path: PathBuf, expected: EntryKind },
    #[snafu(display(
        "{} entries failed to materialize:{}",
        errors.len(),
        describe_failures(errors)
    ))]
    Incomplete { errors: Vec<MaterializeError> },
    #[snafu(display("Failed to create the worker dispatcher"))]
    DispatcherError { source: std::io::Error },
    #[snafu(display(
        "Failed to dispatch work for {}: {}",
        path.display(),
        error
    ))]
    DispatchError { path: PathBuf, error: String },
    #[snafu(display("Work for {} got cancelled", path.display()))]
    CanceledError {
        path: PathBuf,
        source: futures_channel::oneshot::Canceled,
    },
}

impl MaterializeError {
    /// The on-disk path the failure is about, if it concerns a single entry.
    pub fn path(&self) -> Option<&Path> {
        match self {
            MaterializeError::CreateDirError { path, .. }
            | MaterializeError::WriteFileError { path, .. }
            | MaterializeError::KindMismatch { path, .. }
            | MaterializeError::DispatchError { path, .. }
            | MaterializeError::CanceledError { path, .. } => Some(path),
            MaterializeError::InvalidStructure { .. }
            | MaterializeError::Incomplete { .. }
            | MaterializeError::DispatcherError { .. } => None,
        }
    }
}

fn describe_failures(errors: &[MaterializeError]) -> String {
    errors
        .iter()
        .map(|error| match error.source() {
            Some(cause) => format!("\n  - {error}: {cause}"),
            None => format!("\n  - {error}"),
        })
        .collect()
}
