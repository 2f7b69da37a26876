use snafu::Snafu;
use snafu::prelude::*;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::application::summary::print_summary;
use crate::description::{DescriptionError, StructureDescription};
use crate::ext::PathDisplayExt;
use crate::materializer::{
    MaterializeError, MaterializeReport, ParallelMaterializer, StructureMaterializer,
};

pub struct Application;

impl Application {
    pub async fn run(
        app_config: impl Into<RuntimeConfig>,
    ) -> Result<MaterializeReport, ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        let report = Self::materialize(&app_config).await?;
        print_summary(&app_config.root, &report);
        Ok(report)
    }

    async fn materialize(
        app_config: &RuntimeConfig,
    ) -> Result<MaterializeReport, ApplicationError> {
        let root = StructureDescription::read(&app_config.description)
            .await
            .context(DescriptionSnafu)?;
        debug!("Loaded description with {} top-level entries", root.len());

        let result = if app_config.jobs.get() > 1 {
            info!("Materializing with {} workers", app_config.jobs);
            match ParallelMaterializer::new(Some(app_config.jobs), app_config.policy) {
                Ok(materializer) => materializer.materialize(&app_config.root, root).await,
                Err(error) => Err(error),
            }
        } else {
            StructureMaterializer::new(app_config.policy).materialize(&app_config.root, &root)
        };

        result.context(MaterializationSnafu {
            root: app_config.root.clone(),
        })
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading the description"))]
    DescriptionError { source: DescriptionError },
    #[snafu(display("Failed to materialize the structure in {}", root.display_best_effort()))]
    MaterializationError {
        root: PathBuf,
        source: MaterializeError,
    },
}
