//! Change-set application.

use msn_core::RepoCoordinates;
use msn_store::FileStore;
use serde::Serialize;

use crate::planner::ChangeSet;

/// A path the store refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyFailure {
    pub path: String,
    pub error: String,
}

/// Outcome of [`apply_change_set`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub written: Vec<String>,
    pub deleted: Vec<String>,
    pub failures: Vec<ApplyFailure>,
}

impl ApplyReport {
    /// Whether every write and delete succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Write every file, then delete every folder, one call at a time.
///
/// A failing path is recorded and skipped; the rest of the change set is
/// still applied. Nothing is rolled back.
pub async fn apply_change_set(
    store: &dyn FileStore,
    repo: &RepoCoordinates,
    change_set: &ChangeSet,
    message: &str,
) -> ApplyReport {
    let mut report = ApplyReport::default();

    for write in &change_set.writes {
        match store
            .write_file(repo, &write.path, &write.content, message)
            .await
        {
            Ok(()) => report.written.push(write.path.clone()),
            Err(e) => {
                tracing::warn!(%repo, path = %write.path, %e, "write failed");
                report.failures.push(ApplyFailure {
                    path: write.path.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    for folder in &change_set.deletes {
        match store.delete_folder(repo, folder, message).await {
            Ok(()) => report.deleted.push(folder.clone()),
            Err(e) => {
                tracing::warn!(%repo, path = %folder, %e, "delete failed");
                report.failures.push(ApplyFailure {
                    path: folder.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    tracing::debug!(
        %repo,
        written = report.written.len(),
        deleted = report.deleted.len(),
        failed = report.failures.len(),
        "applied change set"
    );
    report
}
