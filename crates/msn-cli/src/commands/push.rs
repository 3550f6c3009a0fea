use anyhow::bail;
use msn_config::MissionConfig;
use msn_core::{MissionData, RepoCoordinates};
use msn_sync::{ApplyReport, apply_change_set};

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::PushArgs;
use crate::commands::plan::{load_snapshots, plan_snapshots};
use crate::commands::shared::message::commit_message;
use crate::output::output;

/// Handle `msn push`.
pub async fn handle(
    args: &PushArgs,
    config: &MissionConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let (cached, current) = load_snapshots(&args.snapshots)?;
    ensure_target(&cached, &current, &args.repo)?;

    let change_set = plan_snapshots(&cached, &current, args.snapshots.teacher, config)?;
    if change_set.is_empty() {
        tracing::info!(repo = %args.repo, "nothing to push");
        return output(&ApplyReport::default(), flags.format);
    }

    let store = bootstrap::github_store(config)?;
    let message = commit_message(args.message.as_deref(), config);
    let report = apply_change_set(store.as_ref(), &args.repo, &change_set, message).await;
    output(&report, flags.format)?;

    if !report.is_complete() {
        bail!(
            "{} of {} paths failed to apply to {}",
            report.failures.len(),
            change_set.writes.len() + change_set.deletes.len(),
            args.repo
        );
    }
    Ok(())
}

/// Both snapshots must describe the repository being written to.
fn ensure_target(
    cached: &MissionData,
    current: &MissionData,
    repo: &RepoCoordinates,
) -> anyhow::Result<()> {
    for (label, snapshot) in [("cached", cached), ("current", current)] {
        let owner = snapshot.mission_repo_data.coordinates();
        if owner != *repo {
            bail!("{label} snapshot belongs to {owner}, not {repo}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use msn_core::MissionRepoData;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cli::OutputFormat;
    use crate::cli::root_commands::SnapshotPair;
    use crate::commands::plan::tests::{mission, pair};

    fn flags() -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            quiet: true,
            verbose: false,
        }
    }

    fn push_args(repo: RepoCoordinates, snapshots: SnapshotPair) -> PushArgs {
        PushArgs {
            repo,
            snapshots,
            message: None,
        }
    }

    fn elsewhere() -> MissionData {
        let mut other = mission();
        other.mission_repo_data = MissionRepoData::new(&RepoCoordinates::new("o", "other"), None);
        other
    }

    #[test]
    fn matching_snapshots_pass() {
        assert!(ensure_target(&mission(), &mission(), &RepoCoordinates::new("o", "m")).is_ok());
    }

    #[test]
    fn snapshot_for_other_repository_is_refused() {
        let repo = RepoCoordinates::new("o", "m");

        let err = ensure_target(&elsewhere(), &mission(), &repo).unwrap_err();
        assert_eq!(err.to_string(), "cached snapshot belongs to o/other, not o/m");

        let err = ensure_target(&mission(), &elsewhere(), &repo).unwrap_err();
        assert_eq!(err.to_string(), "current snapshot belongs to o/other, not o/m");
    }

    #[tokio::test]
    async fn push_to_wrong_repository_fails_before_any_write() {
        let dir = tempfile::tempdir().unwrap();
        let mut current = mission();
        current.tasks_data[0].saved_code = "// edited".into();
        let snapshots = pair(dir.path(), &mission(), &current, false);
        let args = push_args(RepoCoordinates::new("o", "elsewhere"), snapshots);

        let err = handle(&args, &MissionConfig::default(), &flags())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("o/elsewhere"), "{err}");
    }

    #[tokio::test]
    async fn push_with_mixed_snapshots_fails() {
        let dir = tempfile::tempdir().unwrap();
        let snapshots = pair(dir.path(), &mission(), &elsewhere(), false);
        let args = push_args(RepoCoordinates::new("o", "m"), snapshots);

        let err = handle(&args, &MissionConfig::default(), &flags())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("current snapshot"), "{err}");
    }

    #[tokio::test]
    async fn unchanged_push_needs_no_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let snapshots = pair(dir.path(), &mission(), &mission(), false);
        let args = push_args(RepoCoordinates::new("o", "m"), snapshots);

        handle(&args, &MissionConfig::default(), &flags())
            .await
            .unwrap();
    }
}
