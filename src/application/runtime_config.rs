use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::materializer::ErrorPolicy;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub description: PathBuf,
    pub root: PathBuf,
    pub policy: ErrorPolicy,
    pub jobs: NonZeroUsize,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            description: cli.description,
            root: cli.root,
            policy: if cli.keep_going {
                ErrorPolicy::CollectAll
            } else {
                ErrorPolicy::FailFast
            },
            jobs: cli.jobs,
        }
    }
}
