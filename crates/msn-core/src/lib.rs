//! # msn-core
//!
//! Core types and text codecs for mission repositories.
//!
//! A mission is persisted as a tree of plain-text files in a remote
//! repository. This crate owns everything about that layout that does not
//! touch the network:
//! - The mission aggregate (`MissionData`) and its parts
//! - The per-task property schema mapping each task field to one file
//! - The line-based `.metadata` codec
//! - The tagged-text multiple-choice question codec
//! - Cross-cutting error types

pub mod errors;
pub mod mcq;
pub mod metadata;
pub mod mission;
pub mod schema;
pub mod task;

mod json;

pub use errors::CoreError;
pub use mcq::{McqChoice, McqQuestion};
pub use mission::{MissionData, MissionMetadata, MissionRepoData, RepoCoordinates};
pub use schema::{PropertyDescriptor, PropertyRef, PropertySchema, PropertyValue, TaskProperty};
pub use task::{TaskData, TestCase, TestcaseKind};

/// Repository path of the mission briefing.
pub const BRIEFING_FILE: &str = "README.md";

/// Repository path of the mission metadata.
pub const METADATA_FILE: &str = ".metadata";

/// Folder name of the task with the given 1-based question number.
#[must_use]
pub fn task_folder(question_number: usize) -> String {
    format!("Q{question_number}")
}

/// Repository path of a file inside a task folder.
#[must_use]
pub fn task_file_path(question_number: usize, file_name: &str) -> String {
    format!("Q{question_number}/{file_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_paths_are_one_based_folders() {
        assert_eq!(task_folder(1), "Q1");
        assert_eq!(task_file_path(12, "Problem.md"), "Q12/Problem.md");
    }
}
