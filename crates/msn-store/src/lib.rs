//! # msn-store
//!
//! The file store capability consumed by the mission reader and by
//! change-set application, plus two implementations:
//! - [`GitHubStore`]: GitHub REST contents API over `reqwest`
//! - [`MemoryStore`]: in-process map, for tests and dry runs
//!
//! Transport encoding (base64 on GitHub) is decoded here; callers only ever
//! see UTF-8 text. Timeouts belong to the store, retries to its callers.

mod error;
mod github;
mod http;
mod memory;

pub use error::StoreError;
pub use github::GitHubStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use msn_core::RepoCoordinates;
use serde::{Deserialize, Serialize};

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    pub name: String,
    pub is_directory: bool,
}

impl DirEntry {
    #[must_use]
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_directory: false,
        }
    }

    #[must_use]
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_directory: true,
        }
    }
}

/// Remote, revision-controlled file tree addressed by repository and a
/// slash-separated path. The empty path is the repository root.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// List the immediate children of a directory.
    async fn list_directory(
        &self,
        repo: &RepoCoordinates,
        path: &str,
    ) -> Result<Vec<DirEntry>, StoreError>;

    /// Read a whole file as UTF-8 text.
    async fn read_file(&self, repo: &RepoCoordinates, path: &str) -> Result<String, StoreError>;

    /// Create or overwrite a whole file.
    async fn write_file(
        &self,
        repo: &RepoCoordinates,
        path: &str,
        content: &str,
        message: &str,
    ) -> Result<(), StoreError>;

    /// Remove a folder and everything beneath it. Removing a folder that
    /// does not exist succeeds.
    async fn delete_folder(
        &self,
        repo: &RepoCoordinates,
        path: &str,
        message: &str,
    ) -> Result<(), StoreError>;
}
