//! Diff planner.
//!
//! Compares an edited mission against the last-synced ("cached") snapshot
//! and lists the files to write and the task folders to delete. Content
//! equality decides: a file is written only when its encoded value differs
//! from the cached one.
//!
//! Tasks are matched by array position, not by question number. Callers
//! must keep `tasks[i].question_number == i + 1` on both sides.

use msn_core::{
    BRIEFING_FILE, CoreError, METADATA_FILE, MissionData, MissionMetadata, PropertySchema,
    TaskData, TaskProperty, metadata, task_file_path, task_folder,
};
use serde::{Deserialize, Serialize};

/// Who is editing. Teachers author the starter code template, so their
/// saved-code edits are persisted as starter code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Student,
    Teacher,
}

impl EditMode {
    #[must_use]
    pub const fn from_teacher_flag(teacher: bool) -> Self {
        if teacher { Self::Teacher } else { Self::Student }
    }
}

/// One whole-file write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileWrite {
    pub path: String,
    pub content: String,
}

/// Files to write, keyed by repository path, in planning order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WriteSet {
    entries: Vec<FileWrite>,
}

impl WriteSet {
    /// Set the content for `path`. A path already present keeps its
    /// position and takes the new content.
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        let path = path.into();
        let content = content.into();
        if let Some(existing) = self.entries.iter_mut().find(|entry| entry.path == path) {
            existing.content = content;
        } else {
            self.entries.push(FileWrite { path, content });
        }
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| entry.content.as_str())
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.path.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileWrite> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a WriteSet {
    type Item = &'a FileWrite;
    type IntoIter = std::slice::Iter<'a, FileWrite>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Everything needed to bring the repository in line with an edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub writes: WriteSet,
    /// Task folders to remove entirely.
    pub deletes: Vec<String>,
}

impl ChangeSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty() && self.deletes.is_empty()
    }
}

/// Borrowed view of the persisted parts of a mission.
#[derive(Debug, Clone, Copy)]
pub struct MissionSnapshot<'a> {
    pub metadata: &'a MissionMetadata,
    pub briefing: &'a str,
    pub tasks: &'a [TaskData],
}

impl<'a> From<&'a MissionData> for MissionSnapshot<'a> {
    fn from(mission: &'a MissionData) -> Self {
        Self {
            metadata: &mission.mission_metadata,
            briefing: &mission.mission_briefing,
            tasks: &mission.tasks_data,
        }
    }
}

/// Deep value equality over every metadata field.
///
/// Any single differing field, including the due date down to the
/// nanosecond, rewrites the whole `.metadata` file.
fn metadata_equal(a: &MissionMetadata, b: &MissionMetadata) -> bool {
    a == b
}

/// Byte equality of briefing text. Whitespace and line-ending changes count
/// as edits and rewrite `README.md`.
fn briefing_equal(a: &str, b: &str) -> bool {
    a == b
}

/// Stateless planner parameterized by the task file layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffPlanner {
    schema: PropertySchema,
}

impl DiffPlanner {
    #[must_use]
    pub const fn new(schema: PropertySchema) -> Self {
        Self { schema }
    }

    /// Files for a brand-new mission repository.
    ///
    /// Metadata, briefing, and every task's description and starter code
    /// (taken from its saved code) are always written; test cases, prepend
    /// and postpend only when they are not empty.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Json`] if test cases fail to serialize.
    pub fn plan_create(
        &self,
        metadata: &MissionMetadata,
        briefing: &str,
        tasks: &[TaskData],
    ) -> Result<WriteSet, CoreError> {
        let mut writes = WriteSet::default();
        writes.insert(METADATA_FILE, metadata::encode(metadata));
        writes.insert(BRIEFING_FILE, briefing);
        for (idx, task) in tasks.iter().enumerate() {
            self.plan_new_task(&mut writes, idx + 1, task)?;
        }
        tracing::debug!(files = writes.len(), "planned mission creation");
        Ok(writes)
    }

    /// Writes and deletes that turn `cached` into `current`.
    ///
    /// - metadata and briefing are written when they differ
    /// - a task beyond the cached list is planned as new
    /// - a task present on both sides writes each property that differs;
    ///   in [`EditMode::Teacher`] a saved-code change is written to the
    ///   starter code file instead
    /// - a cached task beyond the current list deletes its whole folder
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Json`] if test cases fail to serialize.
    pub fn plan_update(
        &self,
        current: MissionSnapshot<'_>,
        cached: MissionSnapshot<'_>,
        mode: EditMode,
    ) -> Result<ChangeSet, CoreError> {
        let mut change_set = ChangeSet::default();
        let writes = &mut change_set.writes;

        if !metadata_equal(current.metadata, cached.metadata) {
            writes.insert(METADATA_FILE, metadata::encode(current.metadata));
        }
        if !briefing_equal(current.briefing, cached.briefing) {
            writes.insert(BRIEFING_FILE, current.briefing);
        }

        let slots = current.tasks.len().max(cached.tasks.len());
        for idx in 0..slots {
            let question_number = idx + 1;
            match (current.tasks.get(idx), cached.tasks.get(idx)) {
                (Some(task), None) => self.plan_new_task(writes, question_number, task)?,
                (Some(task), Some(cached_task)) => {
                    self.plan_changed_task(writes, question_number, task, cached_task, mode)?;
                }
                (None, Some(_)) => change_set.deletes.push(task_folder(question_number)),
                (None, None) => {}
            }
        }

        tracing::debug!(
            writes = change_set.writes.len(),
            deletes = change_set.deletes.len(),
            ?mode,
            "planned mission update"
        );
        Ok(change_set)
    }

    fn plan_new_task(
        &self,
        writes: &mut WriteSet,
        question_number: usize,
        task: &TaskData,
    ) -> Result<(), CoreError> {
        for descriptor in self.schema.iter() {
            let path = task_file_path(question_number, descriptor.file_name);
            match descriptor.property {
                TaskProperty::TaskDescription => writes.insert(path, task.task_description.as_str()),
                TaskProperty::StarterCode => writes.insert(path, task.saved_code.as_str()),
                TaskProperty::SavedCode => {}
                TaskProperty::TestPrepend | TaskProperty::TestPostpend | TaskProperty::TestCases => {
                    let value = descriptor.property.get(task);
                    if !descriptor.property.is_default_value(value) {
                        writes.insert(path, descriptor.property.to_text(value)?);
                    }
                }
            }
        }
        Ok(())
    }

    fn plan_changed_task(
        &self,
        writes: &mut WriteSet,
        question_number: usize,
        task: &TaskData,
        cached_task: &TaskData,
        mode: EditMode,
    ) -> Result<(), CoreError> {
        for descriptor in self.schema.iter() {
            let property = descriptor.property;
            let value = property.get(task);
            if value.same_as(&property.get(cached_task)) {
                continue;
            }
            let target = if mode == EditMode::Teacher && property == TaskProperty::SavedCode {
                TaskProperty::StarterCode
            } else {
                property
            };
            writes.insert(
                task_file_path(question_number, self.schema.file_name(target)),
                property.to_text(value)?,
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn write_set_insert_replaces_in_place() {
        let mut writes = WriteSet::default();
        writes.insert("a", "1");
        writes.insert("b", "2");
        writes.insert("a", "3");
        assert_eq!(writes.paths().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(writes.get("a"), Some("3"));
        assert_eq!(writes.len(), 2);
    }

    #[test]
    fn write_set_serializes_as_list() {
        let mut writes = WriteSet::default();
        writes.insert("README.md", "hi");
        let json = serde_json::to_value(&writes).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"path": "README.md", "content": "hi"}])
        );
    }

    #[test]
    fn edit_mode_from_flag() {
        assert_eq!(EditMode::from_teacher_flag(true), EditMode::Teacher);
        assert_eq!(EditMode::from_teacher_flag(false), EditMode::Student);
    }

    #[test]
    fn empty_change_set() {
        assert!(ChangeSet::default().is_empty());
    }
}
