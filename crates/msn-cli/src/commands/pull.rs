use std::path::PathBuf;
use std::sync::Arc;

use msn_config::MissionConfig;
use msn_core::{MissionRepoData, RepoCoordinates};
use msn_sync::{CollectingSink, MissionReader, ReadWarning, TracingSink, WarningSink};
use serde::Serialize;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::PullArgs;
use crate::commands::shared::snapshot::write_snapshot;
use crate::output::output;

#[derive(Debug, Serialize)]
struct PullSummary {
    repo: RepoCoordinates,
    tasks: usize,
    out: PathBuf,
    warnings: Vec<ReadWarning>,
}

/// Handle `msn pull`.
pub async fn handle(
    args: &PullArgs,
    config: &MissionConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let store = bootstrap::github_store(config)?;
    let sink = Arc::new(CollectingSink::new());
    let reader = MissionReader::new(store)
        .with_max_tasks(config.general.max_tasks)
        .with_sink(Arc::clone(&sink) as Arc<dyn WarningSink>);

    let repo_data = MissionRepoData::new(&args.repo, None);
    let mission = reader.read(&repo_data).await;

    let warnings = sink.take();
    for warning in &warnings {
        TracingSink.warn(warning.clone());
    }
    tracing::info!(
        repo = %args.repo,
        tasks = mission.tasks_data.len(),
        warnings = warnings.len(),
        "pulled mission"
    );

    match &args.out {
        Some(path) => {
            write_snapshot(path, &mission)?;
            output(
                &PullSummary {
                    repo: args.repo.clone(),
                    tasks: mission.tasks_data.len(),
                    out: path.clone(),
                    warnings,
                },
                flags.format,
            )
        }
        None => output(&mission, flags.format),
    }
}
