use std::path::PathBuf;

use clap::{Args, Subcommand};
use msn_core::RepoCoordinates;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Read a mission repository into a JSON snapshot.
    Pull(PullArgs),
    /// Show the changes between two snapshots without touching a repository.
    Plan(PlanArgs),
    /// Persist an edited snapshot to its repository.
    Push(PushArgs),
    /// Populate a fresh repository from a snapshot.
    Create(CreateArgs),
    /// Decode a multiple-choice task description.
    Mcq(McqArgs),
}

#[derive(Clone, Debug, Args)]
pub struct PullArgs {
    /// Repository as owner/name.
    pub repo: RepoCoordinates,

    /// Write the snapshot to this file instead of stdout.
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// The pair of snapshots a diff is computed from.
#[derive(Clone, Debug, Args)]
pub struct SnapshotPair {
    /// Snapshot as last pulled or pushed.
    #[arg(long)]
    pub cached: PathBuf,

    /// Snapshot with the edits to persist.
    #[arg(long)]
    pub current: PathBuf,

    /// Edit as a teacher: saved-code changes update the starter code.
    #[arg(long)]
    pub teacher: bool,
}

#[derive(Clone, Debug, Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub snapshots: SnapshotPair,
}

#[derive(Clone, Debug, Args)]
pub struct PushArgs {
    /// Repository as owner/name.
    pub repo: RepoCoordinates,

    #[command(flatten)]
    pub snapshots: SnapshotPair,

    /// Commit message (defaults to general.commit_message).
    #[arg(short, long)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct CreateArgs {
    /// Repository as owner/name.
    pub repo: RepoCoordinates,

    /// Snapshot to populate the repository from.
    #[arg(long)]
    pub from: PathBuf,

    /// Commit message (defaults to general.commit_message).
    #[arg(short, long)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct McqArgs {
    /// File holding a task description, e.g. Q1/Problem.md.
    pub file: PathBuf,
}
