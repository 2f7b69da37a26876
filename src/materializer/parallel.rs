use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::thread::available_parallelism;

use compio::dispatcher::{Dispatcher, DispatcherBuilder};
use compio::runtime::spawn;
use futures::StreamExt;
use futures_channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use snafu::ResultExt;
use tracing::{debug, info, warn};

use super::entry::{ensure_directory, materialize_entry};
use super::error::{DispatcherSnafu, InvalidStructureSnafu, MaterializeError};
use super::materializer::ErrorPolicy;
use super::report::MaterializeReport;
use crate::ext::PathDisplayExt;
use crate::structure::{Container, Node};

type LevelResult = Result<LevelOutcome, MaterializeError>;

/// Materializes independent sibling directories on worker threads.
///
/// The unit of work is a single container level: its direct entries are
/// created, and each non-empty child container becomes a new unit once its
/// directory exists. The resulting tree is the same as the one produced by
/// [`StructureMaterializer`](super::StructureMaterializer).
pub struct ParallelMaterializer {
    dispatcher: Dispatcher,
    policy: ErrorPolicy,
}

/// Result of materializing one container level.
#[derive(Debug, Default)]
struct LevelOutcome {
    report: MaterializeReport,
    pending: Vec<(PathBuf, Container)>,
    errors: Vec<MaterializeError>,
}

impl ParallelMaterializer {
    /// Creates a materializer with `workers` threads, or one per available
    /// core when `None`.
    pub fn new(
        workers: Option<NonZeroUsize>,
        policy: ErrorPolicy,
    ) -> Result<Self, MaterializeError> {
        let workers_num = workers.unwrap_or_else(Self::determine_worker_count);
        debug!("Using {} worker threads for materialization", workers_num);

        let dispatcher = DispatcherBuilder::new()
            .worker_threads(workers_num)
            .build()
            .context(DispatcherSnafu)?;

        Ok(Self { dispatcher, policy })
    }

    fn determine_worker_count() -> NonZeroUsize {
        available_parallelism().unwrap_or(NonZeroUsize::MIN)
    }

    /// Creates every entry of `root` below `base_path`.
    ///
    /// Failures from all branches are collected. Under
    /// [`ErrorPolicy::FailFast`] no new work is dispatched after the first
    /// failure, but work already running is awaited and its failures reported
    /// as well.
    pub async fn materialize(
        &self,
        base_path: impl Into<PathBuf>,
        root: Container,
    ) -> Result<MaterializeReport, MaterializeError> {
        let base_path = base_path.into();
        root.validate().context(InvalidStructureSnafu)?;
        info!(
            "Materializing {} top-level entries into {} in parallel",
            root.len(),
            base_path.display_best_effort()
        );
        ensure_directory(&base_path)?;

        let (sender, mut receiver) = mpsc::unbounded::<LevelResult>();
        self.dispatch_level(sender.clone(), base_path, root, true)?;

        self.process_level_results(&mut receiver, &sender).await
    }

    /// Collects finished levels and dispatches the containers they uncovered
    /// until no work is left.
    async fn process_level_results(
        &self,
        receiver: &mut UnboundedReceiver<LevelResult>,
        sender: &UnboundedSender<LevelResult>,
    ) -> Result<MaterializeReport, MaterializeError> {
        let mut in_flight = 1usize;
        let mut report = MaterializeReport::default();
        let mut errors = Vec::new();

        while in_flight > 0 {
            let Some(result) = receiver.next().await else {
                warn!("Result channel closed with {} levels in flight", in_flight);
                break;
            };
            in_flight -= 1;

            let outcome = match result {
                Ok(outcome) => outcome,
                Err(error) => {
                    errors.push(error);
                    continue;
                }
            };
            report.merge(outcome.report);
            errors.extend(outcome.errors);

            if self.policy == ErrorPolicy::FailFast && !errors.is_empty() {
                debug!(
                    "Not dispatching {} pending directories after a failure",
                    outcome.pending.len()
                );
                continue;
            }

            for (path, container) in outcome.pending {
                match self.dispatch_level(sender.clone(), path, container, false) {
                    Ok(()) => in_flight += 1,
                    Err(error) => errors.push(error),
                }
            }
        }

        debug!("Parallel materialization finished: {:?}", report);
        self.policy.conclude(report, errors)
    }

    /// Runs one container level on the dispatcher and forwards its outcome
    /// to `sender`.
    fn dispatch_level(
        &self,
        sender: UnboundedSender<LevelResult>,
        path: PathBuf,
        container: Container,
        is_root: bool,
    ) -> Result<(), MaterializeError> {
        let policy = self.policy;
        let level_path = path.clone();

        let receiver = self
            .dispatcher
            .dispatch(move || async move {
                materialize_level(&level_path, container, is_root, policy)
            })
            .map_err(|e| MaterializeError::DispatchError {
                path: path.clone(),
                error: e.to_string(),
            })?;

        debug!("Dispatched {}", path.display());

        spawn(async move {
            let result = match receiver.await {
                Ok(outcome) => Ok(outcome),
                Err(e) => {
                    debug!("Work for {} was canceled: {}", path.display(), e);
                    Err(MaterializeError::CanceledError {
                        path: path.clone(),
                        source: e,
                    })
                }
            };

            if let Err(send_err) = sender.unbounded_send(result) {
                debug!(
                    "Failed to send result for {}: {}",
                    path.display(),
                    send_err
                );
            }
        })
        .detach();

        Ok(())
    }
}

/// Materializes the direct entries of `container` below `path`.
fn materialize_level(
    path: &Path,
    container: Container,
    is_root: bool,
    policy: ErrorPolicy,
) -> LevelOutcome {
    let mut outcome = LevelOutcome::default();

    for (name, node) in container {
        let child_path = path.join(&name);
        match materialize_entry(&child_path, &node) {
            Ok(entry_outcome) => {
                outcome.report.record(entry_outcome);
                if is_root {
                    outcome.report.top_level.push(name);
                }
                if let Node::Container(child) = node {
                    if !child.is_empty() {
                        outcome.pending.push((child_path, child));
                    }
                }
            }
            Err(error) => {
                outcome.errors.push(error);
                if policy == ErrorPolicy::FailFast {
                    break;
                }
            }
        }
    }

    outcome
}
