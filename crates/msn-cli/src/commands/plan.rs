use msn_config::MissionConfig;
use msn_core::MissionData;
use msn_sync::{ChangeSet, DiffPlanner, EditMode};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{PlanArgs, SnapshotPair};
use crate::commands::shared::snapshot::read_snapshot;
use crate::output::output;

/// Handle `msn plan`.
pub fn handle(args: &PlanArgs, config: &MissionConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let change_set = change_set_for(&args.snapshots, config)?;
    output(&change_set, flags.format)
}

/// Diff two snapshot files. `--teacher` or `general.teacher_mode` selects
/// teacher editing.
pub fn change_set_for(
    snapshots: &SnapshotPair,
    config: &MissionConfig,
) -> anyhow::Result<ChangeSet> {
    let (cached, current) = load_snapshots(snapshots)?;

    if current.mission_repo_data != cached.mission_repo_data {
        tracing::warn!(
            cached = %cached.mission_repo_data.coordinates(),
            current = %current.mission_repo_data.coordinates(),
            "snapshots belong to different repositories"
        );
    }

    plan_snapshots(&cached, &current, snapshots.teacher, config)
}

/// Read the cached and current snapshots, in that order.
pub fn load_snapshots(snapshots: &SnapshotPair) -> anyhow::Result<(MissionData, MissionData)> {
    let cached = read_snapshot(&snapshots.cached)?;
    let current = read_snapshot(&snapshots.current)?;
    Ok((cached, current))
}

pub fn plan_snapshots(
    cached: &MissionData,
    current: &MissionData,
    teacher: bool,
    config: &MissionConfig,
) -> anyhow::Result<ChangeSet> {
    let mode = EditMode::from_teacher_flag(teacher || config.general.teacher_mode);
    Ok(DiffPlanner::default().plan_update(current.into(), cached.into(), mode)?)
}
