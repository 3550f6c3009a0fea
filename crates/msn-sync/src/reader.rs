//! Mission reader.
//!
//! Reassembles a [`MissionData`] from a repository:
//!
//! 1. Fetch `README.md`, `.metadata` and the root listing concurrently.
//! 2. Probe `Q1, Q2, ...` against the root listing, stopping at the first
//!    missing folder or at the task cap.
//! 3. Per task folder (concurrently): list it once, then fetch only the
//!    schema files it contains (concurrently).
//! 4. Decode, default what is missing, and sort by question number.
//!
//! Every failure is recovered locally: the path is reported to the
//! [`WarningSink`] and the value falls back to its default.

use std::collections::HashSet;
use std::sync::Arc;

use msn_core::{
    BRIEFING_FILE, METADATA_FILE, MissionData, MissionRepoData, PropertySchema, RepoCoordinates,
    TaskData, TaskProperty, metadata, task_file_path, task_folder,
};
use msn_store::{DirEntry, FileStore, StoreError};
use tokio::task::JoinSet;

use crate::notify::{ReadWarning, TracingSink, WarningKind, WarningSink};

/// Highest question number probed by default.
pub const DEFAULT_MAX_TASKS: usize = 20;

/// Reads missions from a [`FileStore`]. Holds no per-read state, so one
/// reader can serve concurrent reads.
pub struct MissionReader {
    store: Arc<dyn FileStore>,
    schema: PropertySchema,
    sink: Arc<dyn WarningSink>,
    max_tasks: usize,
}

/// Everything a spawned per-task read needs, owned.
#[derive(Clone)]
struct TaskReadContext {
    store: Arc<dyn FileStore>,
    repo: RepoCoordinates,
    schema: PropertySchema,
    sink: Arc<dyn WarningSink>,
}

impl TaskReadContext {
    fn warn(&self, path: String, kind: WarningKind, error: &dyn std::fmt::Display) {
        self.sink.warn(ReadWarning {
            path,
            kind,
            message: error.to_string(),
        });
    }
}

impl MissionReader {
    /// Reader with the standard schema, tracing warnings, and a cap of
    /// [`DEFAULT_MAX_TASKS`].
    #[must_use]
    pub fn new(store: Arc<dyn FileStore>) -> Self {
        Self {
            store,
            schema: PropertySchema::STANDARD,
            sink: Arc::new(TracingSink),
            max_tasks: DEFAULT_MAX_TASKS,
        }
    }

    #[must_use]
    pub const fn with_schema(mut self, schema: PropertySchema) -> Self {
        self.schema = schema;
        self
    }

    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn WarningSink>) -> Self {
        self.sink = sink;
        self
    }

    #[must_use]
    pub const fn with_max_tasks(mut self, max_tasks: usize) -> Self {
        self.max_tasks = max_tasks;
        self
    }

    /// Read the mission stored in `repo_data`'s repository.
    ///
    /// Never fails. Unreadable files are reported to the warning sink and
    /// replaced by defaults; a gap in task numbering silently ends the task
    /// list.
    pub async fn read(&self, repo_data: &MissionRepoData) -> MissionData {
        let repo = repo_data.coordinates();
        let ctx = TaskReadContext {
            store: Arc::clone(&self.store),
            repo: repo.clone(),
            schema: self.schema,
            sink: Arc::clone(&self.sink),
        };

        let (briefing, metadata_text, root) = tokio::join!(
            self.store.read_file(&repo, BRIEFING_FILE),
            self.store.read_file(&repo, METADATA_FILE),
            self.store.list_directory(&repo, ""),
        );

        let mission_briefing = recover(&ctx, briefing, BRIEFING_FILE, WarningKind::Fetch)
            .unwrap_or_default();
        let mission_metadata = recover(&ctx, metadata_text, METADATA_FILE, WarningKind::Fetch)
            .map(|text| metadata::decode(&text))
            .unwrap_or_default();
        let root = recover(&ctx, root, "", WarningKind::Listing).unwrap_or_default();

        let task_count = discover_task_count(&root, self.max_tasks);
        tracing::debug!(%repo, task_count, "discovered task folders");

        let tasks_data = read_tasks(&ctx, task_count).await;

        MissionData {
            mission_repo_data: repo_data.clone(),
            mission_briefing,
            mission_metadata,
            tasks_data,
        }
    }
}

fn recover<T>(
    ctx: &TaskReadContext,
    result: Result<T, StoreError>,
    path: &str,
    kind: WarningKind,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            ctx.warn(path.to_string(), kind, &e);
            None
        }
    }
}

/// Number of contiguous `Q<n>` folders starting at `Q1`, capped at
/// `max_tasks`.
fn discover_task_count(root: &[DirEntry], max_tasks: usize) -> usize {
    let folders: HashSet<&str> = root
        .iter()
        .filter(|entry| entry.is_directory)
        .map(|entry| entry.name.as_str())
        .collect();

    (1..=max_tasks)
        .take_while(|n| folders.contains(task_folder(*n).as_str()))
        .count()
}

async fn read_tasks(ctx: &TaskReadContext, task_count: usize) -> Vec<TaskData> {
    let mut set = JoinSet::new();
    for question_number in 1..=task_count {
        let ctx = ctx.clone();
        set.spawn(async move { read_task(ctx, question_number).await });
    }

    let mut tasks = Vec::with_capacity(task_count);
    while let Some(res) = set.join_next().await {
        match res {
            Ok(task) => tasks.push(task),
            Err(e) => tracing::warn!(%e, "task read failed"),
        }
    }

    // A task lost to a failed join still occupies its slot.
    let seen: HashSet<usize> = tasks.iter().map(|task| task.question_number).collect();
    for question_number in 1..=task_count {
        if !seen.contains(&question_number) {
            ctx.warn(
                task_folder(question_number),
                WarningKind::Fetch,
                &"task read did not complete",
            );
            tasks.push(TaskData::new(question_number));
        }
    }

    tasks.sort_by_key(|task| task.question_number);
    tasks
}

async fn read_task(ctx: TaskReadContext, question_number: usize) -> TaskData {
    let folder = task_folder(question_number);
    let listing = match ctx.store.list_directory(&ctx.repo, &folder).await {
        Ok(entries) => entries,
        Err(e) => {
            ctx.warn(folder.clone(), WarningKind::Listing, &e);
            Vec::new()
        }
    };
    let present: HashSet<&str> = listing
        .iter()
        .filter(|entry| !entry.is_directory)
        .map(|entry| entry.name.as_str())
        .collect();

    let mut fetches = JoinSet::new();
    for descriptor in ctx.schema.iter() {
        if !present.contains(descriptor.file_name) {
            continue;
        }
        let store = Arc::clone(&ctx.store);
        let repo = ctx.repo.clone();
        let path = task_file_path(question_number, descriptor.file_name);
        fetches.spawn(async move {
            let result = store.read_file(&repo, &path).await;
            (descriptor.property, path, result)
        });
    }

    let mut task = TaskData::new(question_number);
    let mut saved_code_loaded = false;
    while let Some(res) = fetches.join_next().await {
        let (property, path, result) = match res {
            Ok(fetched) => fetched,
            Err(e) => {
                ctx.warn(folder.clone(), WarningKind::Fetch, &e);
                continue;
            }
        };
        let content = match result {
            Ok(content) => content,
            Err(e) => {
                ctx.warn(path, WarningKind::Fetch, &e);
                continue;
            }
        };
        let applied = property
            .from_text(&content)
            .and_then(|value| property.set(&mut task, value));
        match applied {
            Ok(()) => saved_code_loaded |= property == TaskProperty::SavedCode,
            Err(e) => ctx.warn(path, WarningKind::Decode, &e),
        }
    }

    if !saved_code_loaded {
        task.saved_code.clone_from(&task.starter_code);
    }
    task
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_stops_at_first_gap() {
        let root = vec![
            DirEntry::directory("Q1"),
            DirEntry::directory("Q2"),
            DirEntry::directory("Q4"),
            DirEntry::file("README.md"),
        ];
        assert_eq!(discover_task_count(&root, 20), 2);
    }

    #[test]
    fn discovery_ignores_files_named_like_folders() {
        let root = vec![DirEntry::file("Q1"), DirEntry::directory("Q2")];
        assert_eq!(discover_task_count(&root, 20), 0);
    }

    #[test]
    fn discovery_respects_cap() {
        let root: Vec<DirEntry> = (1..=25)
            .map(|n| DirEntry::directory(task_folder(n)))
            .collect();
        assert_eq!(discover_task_count(&root, 20), 20);
        assert_eq!(discover_task_count(&root, 3), 3);
    }

    #[test]
    fn discovery_of_empty_root() {
        assert_eq!(discover_task_count(&[], 20), 0);
    }
}
