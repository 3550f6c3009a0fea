//! Mission aggregate and its identity/metadata parts.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::task::TaskData;

/// Owner and name of a remote repository.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RepoCoordinates {
    pub owner: String,
    pub name: String,
}

impl RepoCoordinates {
    #[must_use]
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoCoordinates {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (owner, name) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| CoreError::InvalidRepository(s.to_string()))?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(CoreError::InvalidRepository(s.to_string()));
        }
        Ok(Self::new(owner, name))
    }
}

/// Identity of the repository backing a mission. Set once when the mission
/// is opened and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionRepoData {
    pub repo_owner: String,
    pub repo_name: String,
    #[serde(default)]
    pub date_of_creation: Option<DateTime<Utc>>,
}

impl MissionRepoData {
    #[must_use]
    pub fn new(coordinates: &RepoCoordinates, date_of_creation: Option<DateTime<Utc>>) -> Self {
        Self {
            repo_owner: coordinates.owner.clone(),
            repo_name: coordinates.name.clone(),
            date_of_creation,
        }
    }

    #[must_use]
    pub fn coordinates(&self) -> RepoCoordinates {
        RepoCoordinates::new(&self.repo_owner, &self.repo_name)
    }
}

/// Descriptive metadata stored in the `.metadata` file.
///
/// Treated as a value: an edit replaces the whole struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionMetadata {
    pub cover_image: String,
    pub kind: String,
    pub number: i64,
    pub title: String,
    pub source_version: i64,
    pub due_date: Option<DateTime<Utc>>,
    pub reading: String,
    pub web_summary: String,
}

impl Default for MissionMetadata {
    fn default() -> Self {
        Self {
            cover_image: String::new(),
            kind: String::from("Mission"),
            number: 0,
            title: String::new(),
            source_version: 1,
            due_date: None,
            reading: String::new(),
            web_summary: String::new(),
        }
    }
}

/// The aggregate root read from and written to a mission repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionData {
    pub mission_repo_data: MissionRepoData,
    #[serde(default)]
    pub mission_briefing: String,
    #[serde(default)]
    pub mission_metadata: MissionMetadata,
    #[serde(default)]
    pub tasks_data: Vec<TaskData>,
}

impl MissionData {
    /// Check that question numbers run `1..=N` in array order.
    ///
    /// The diff planner indexes tasks by position, so a snapshot whose
    /// numbering has drifted from its order would produce wrong file paths.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] naming the first out-of-place task.
    pub fn validate_task_order(&self) -> Result<(), CoreError> {
        for (idx, task) in self.tasks_data.iter().enumerate() {
            if task.question_number != idx + 1 {
                return Err(CoreError::Validation(format!(
                    "task at position {} has question number {} (expected {})",
                    idx,
                    task.question_number,
                    idx + 1
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_owner_and_name() {
        let repo: RepoCoordinates = "source-academy/sa-mission-1".parse().unwrap();
        assert_eq!(repo.owner, "source-academy");
        assert_eq!(repo.name, "sa-mission-1");
        assert_eq!(repo.to_string(), "source-academy/sa-mission-1");
    }

    #[test]
    fn rejects_malformed_repository() {
        for input in ["", "owner", "/name", "owner/", "a/b/c"] {
            let err = input.parse::<RepoCoordinates>().unwrap_err();
            assert!(matches!(err, CoreError::InvalidRepository(_)), "{input}");
        }
    }

    #[test]
    fn metadata_defaults() {
        let metadata = MissionMetadata::default();
        assert_eq!(metadata.kind, "Mission");
        assert_eq!(metadata.source_version, 1);
        assert!(metadata.due_date.is_none());
    }

    #[test]
    fn task_order_validation() {
        let mut mission = MissionData {
            mission_repo_data: MissionRepoData::new(&RepoCoordinates::new("o", "r"), None),
            mission_briefing: String::new(),
            mission_metadata: MissionMetadata::default(),
            tasks_data: vec![TaskData::new(1), TaskData::new(2)],
        };
        assert!(mission.validate_task_order().is_ok());

        mission.tasks_data.swap(0, 1);
        let err = mission.validate_task_order().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
