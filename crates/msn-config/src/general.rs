//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default cap on task discovery (`Q1..=Q20`).
const fn default_max_tasks() -> usize {
    20
}

fn default_commit_message() -> String {
    String::from("Update mission")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Highest question number probed when discovering task folders.
    #[serde(default = "default_max_tasks")]
    pub max_tasks: usize,

    /// Commit message used when applying a change set.
    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    /// Redirect saved-code edits to the starter code template by default.
    #[serde(default)]
    pub teacher_mode: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            max_tasks: default_max_tasks(),
            commit_message: default_commit_message(),
            teacher_mode: false,
        }
    }
}
