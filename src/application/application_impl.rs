use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::application::printer::PathPrinter;
use selectree::config::{SelectionConfig, SelectionConfigError};
use selectree::events::TracingObserver;
use selectree::snapshot::{Snapshot, SnapshotError};
use selectree::tree::{SelectionTree, TreeError};

pub struct Application;

impl Application {
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        let config = match &app_config.config {
            Some(path) => SelectionConfig::from_path(path.clone()).await,
            None => SelectionConfig::read(&app_config.root).await,
        }
        .context(ConfigSnafu)?;
        debug!("Loaded config: {:?}", config);

        let snapshot = Snapshot::read(&app_config.snapshot)
            .await
            .context(SnapshotSnafu)?;
        let (mut tree, report) =
            SelectionTree::build(&config, snapshot.entries()).context(TreeSnafu)?;
        info!(
            "Built tree with {} entries, {} skipped",
            report.inserted, report.skipped
        );
        tree.subscribe(Box::new(TracingObserver));

        for refresh in &app_config.refreshes {
            let listing = Snapshot::read(&refresh.listing)
                .await
                .context(SnapshotSnafu)?;
            let dir = tree.resolve(&refresh.dir).context(TreeSnafu)?;
            let report = tree
                .reconcile(dir, listing.into_entries())
                .context(TreeSnafu)?;
            debug!("Refreshed '{}': {:?}", refresh.dir, report);
        }

        for selection in &app_config.selections {
            let id = tree.resolve(&selection.path).context(TreeSnafu)?;
            let touched = tree
                .apply_selection(id, selection.state)
                .context(TreeSnafu)?;
            debug!(
                "Selected '{}' as {}, {} ancestors updated",
                selection.path,
                selection.state,
                touched.len()
            );
        }

        let printer = PathPrinter::new();
        for list in &app_config.show {
            printer.print(*list, &tree);
        }

        Ok(())
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered during configuration stage"))]
    ConfigError { source: SelectionConfigError },
    #[snafu(display("Critical failure encountered while loading a snapshot"))]
    SnapshotError { source: SnapshotError },
    #[snafu(display("Critical failure encountered while updating the tree"))]
    TreeError { source: TreeError },
}
