use anyhow::bail;
use msn_config::MissionConfig;
use msn_sync::{ChangeSet, DiffPlanner, apply_change_set};

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::CreateArgs;
use crate::commands::shared::message::commit_message;
use crate::commands::shared::snapshot::read_snapshot;
use crate::output::output;

/// Handle `msn create`.
pub async fn handle(
    args: &CreateArgs,
    config: &MissionConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let source = read_snapshot(&args.from)?;
    let writes = DiffPlanner::default().plan_create(
        &source.mission_metadata,
        &source.mission_briefing,
        &source.tasks_data,
    )?;

    let store = bootstrap::github_store(config)?;
    let change_set = ChangeSet {
        writes,
        deletes: Vec::new(),
    };
    let message = commit_message(args.message.as_deref(), config);
    let report = apply_change_set(store.as_ref(), &args.repo, &change_set, message).await;
    output(&report, flags.format)?;

    if !report.is_complete() {
        bail!(
            "{} of {} files failed to write to {}",
            report.failures.len(),
            change_set.writes.len(),
            args.repo
        );
    }
    Ok(())
}
