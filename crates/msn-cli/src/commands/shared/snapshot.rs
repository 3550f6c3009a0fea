use std::path::Path;

use anyhow::Context;
use msn_core::MissionData;

/// Load a mission snapshot written by `msn pull`.
pub fn read_snapshot(path: &Path) -> anyhow::Result<MissionData> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let mission: MissionData = serde_json::from_str(&text)
        .with_context(|| format!("invalid snapshot {}", path.display()))?;
    mission
        .validate_task_order()
        .with_context(|| format!("invalid snapshot {}", path.display()))?;
    Ok(mission)
}

/// Persist a mission snapshot as pretty JSON.
pub fn write_snapshot(path: &Path, mission: &MissionData) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(mission)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write snapshot {}", path.display()))
}
