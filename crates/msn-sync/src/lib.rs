//! # msn-sync
//!
//! Reconciles an edited mission with its repository:
//! - [`MissionReader`] reassembles a [`MissionData`] from the file store,
//!   recovering from per-file failures
//! - [`DiffPlanner`] computes the minimal files to write and folders to
//!   delete to persist an edit
//! - [`apply_change_set`] pushes a planned change set through a store
//!
//! Flow:
//!
//! ```text
//! FileStore ──read──▶ MissionData ──(edit)──▶ DiffPlanner ──▶ ChangeSet ──apply──▶ FileStore
//!                         │                       ▲
//!                         └──── cached snapshot ──┘
//! ```
//!
//! [`MissionData`]: msn_core::MissionData

pub mod apply;
pub mod notify;
pub mod planner;
pub mod reader;

pub use apply::{ApplyFailure, ApplyReport, apply_change_set};
pub use notify::{CollectingSink, ReadWarning, TracingSink, WarningKind, WarningSink};
pub use planner::{ChangeSet, DiffPlanner, EditMode, FileWrite, MissionSnapshot, WriteSet};
pub use reader::{DEFAULT_MAX_TASKS, MissionReader};
