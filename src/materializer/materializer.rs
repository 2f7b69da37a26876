use std::path::{Path, PathBuf};

use hashlink::linked_hash_map::Iter;
use snafu::prelude::*;
use tracing::{debug, info, warn};

use super::entry::{ensure_directory, materialize_entry};
use super::error::{InvalidStructureSnafu, MaterializeError};
use super::report::MaterializeReport;
use crate::ext::PathDisplayExt;
use crate::structure::{Container, Node};

/// What to do when a single entry cannot be materialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Abort on the first failure, leaving earlier entries on disk.
    #[default]
    FailFast,
    /// Skip the failing entry and its subtree, keep going, and report every
    /// failure at the end.
    CollectAll,
}

impl ErrorPolicy {
    /// Turns the collected failures of a run into its final result.
    pub(super) fn conclude(
        self,
        report: MaterializeReport,
        mut errors: Vec<MaterializeError>,
    ) -> Result<MaterializeReport, MaterializeError> {
        if errors.is_empty() {
            return Ok(report);
        }
        if self == ErrorPolicy::FailFast && errors.len() == 1 {
            if let Some(error) = errors.pop() {
                return Err(error);
            }
        }
        Err(MaterializeError::Incomplete { errors })
    }
}

/// Sequential, depth-first, pre-order materialization of a description.
#[derive(Debug, Clone, Default)]
pub struct StructureMaterializer {
    policy: ErrorPolicy,
}

/// One container being walked: where it lives and which entries are left.
struct Frame<'a> {
    path: PathBuf,
    entries: Iter<'a, String, Node>,
    is_root: bool,
}

impl StructureMaterializer {
    pub fn new(policy: ErrorPolicy) -> Self {
        Self { policy }
    }

    /// Creates every entry of `root` below `base_path`.
    ///
    /// Names are validated for the whole tree before anything is written.
    /// `base_path` and its missing ancestors are created first. Directories
    /// that already exist are reused and files are always overwritten, so
    /// running twice leaves the same tree as running once.
    pub fn materialize(
        &self,
        base_path: &Path,
        root: &Container,
    ) -> Result<MaterializeReport, MaterializeError> {
        root.validate().context(InvalidStructureSnafu)?;
        info!(
            "Materializing {} top-level entries into {}",
            root.len(),
            base_path.display_best_effort()
        );
        ensure_directory(base_path)?;

        let mut report = MaterializeReport::default();
        let mut errors = Vec::new();
        let mut frontier = vec![Frame {
            path: base_path.to_path_buf(),
            entries: root.iter(),
            is_root: true,
        }];

        while let Some(frame) = frontier.last_mut() {
            let Some((name, node)) = frame.entries.next() else {
                frontier.pop();
                continue;
            };
            let child_path = frame.path.join(name);
            let is_top_level = frame.is_root;

            match materialize_entry(&child_path, node) {
                Ok(outcome) => {
                    report.record(outcome);
                    if is_top_level {
                        report.top_level.push(name.clone());
                    }
                    if let Node::Container(container) = node {
                        if !container.is_empty() {
                            frontier.push(Frame {
                                path: child_path,
                                entries: container.iter(),
                                is_root: false,
                            });
                        }
                    }
                }
                Err(error) => match self.policy {
                    ErrorPolicy::FailFast => return Err(error),
                    ErrorPolicy::CollectAll => {
                        warn!("Skipping {}: {}", child_path.display(), error);
                        errors.push(error);
                    }
                },
            }
        }

        debug!("Materialization finished: {:?}", report);
        self.policy.conclude(report, errors)
    }
}

/// Materializes `root` below `base_path`, stopping at the first failure.
pub fn materialize(
    base_path: &Path,
    root: &Container,
) -> Result<MaterializeReport, MaterializeError> {
    StructureMaterializer::default().materialize(base_path, root)
}
