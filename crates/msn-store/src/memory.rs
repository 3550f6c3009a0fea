//! In-memory file store.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, PoisonError, RwLock};

use async_trait::async_trait;
use msn_core::RepoCoordinates;

use crate::error::StoreError;
use crate::{DirEntry, FileStore};

type Tree = BTreeMap<String, String>;

/// [`FileStore`] holding every repository as a map from file path to
/// content. Directories exist implicitly through the paths beneath them.
///
/// Reads can be made to fail per path with [`MemoryStore::fail_reads_of`],
/// and every successful or failed read is recorded in order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    repos: RwLock<HashMap<RepoCoordinates, Tree>>,
    failing_reads: RwLock<HashSet<(RepoCoordinates, String)>>,
    read_log: Mutex<Vec<String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`MemoryStore::insert`].
    #[must_use]
    pub fn with_file(self, repo: &RepoCoordinates, path: &str, content: &str) -> Self {
        self.insert(repo, path, content);
        self
    }

    /// Create or overwrite a file.
    pub fn insert(&self, repo: &RepoCoordinates, path: &str, content: &str) {
        self.repos
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(repo.clone())
            .or_default()
            .insert(normalize(path), content.to_string());
    }

    /// Current content of a file.
    #[must_use]
    pub fn get(&self, repo: &RepoCoordinates, path: &str) -> Option<String> {
        self.repos
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(repo)
            .and_then(|tree| tree.get(&normalize(path)).cloned())
    }

    /// All file paths of a repository, sorted.
    #[must_use]
    pub fn paths(&self, repo: &RepoCoordinates) -> Vec<String> {
        self.repos
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(repo)
            .map(|tree| tree.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Make every subsequent read of `path` fail with an API error.
    pub fn fail_reads_of(&self, repo: &RepoCoordinates, path: &str) {
        self.failing_reads
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((repo.clone(), normalize(path)));
    }

    /// Paths passed to `read_file`, in call order.
    #[must_use]
    pub fn read_log(&self) -> Vec<String> {
        self.read_log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn normalize(path: &str) -> String {
    path.trim_matches('/').to_string()
}

#[async_trait]
impl FileStore for MemoryStore {
    async fn list_directory(
        &self,
        repo: &RepoCoordinates,
        path: &str,
    ) -> Result<Vec<DirEntry>, StoreError> {
        let dir = normalize(path);
        let prefix = if dir.is_empty() {
            String::new()
        } else {
            format!("{dir}/")
        };

        let repos = self.repos.read().unwrap_or_else(PoisonError::into_inner);
        let Some(tree) = repos.get(repo) else {
            return Err(StoreError::NotFound(repo.to_string()));
        };

        let mut children: BTreeMap<String, bool> = BTreeMap::new();
        for key in tree.keys() {
            let Some(rest) = key.strip_prefix(&prefix) else {
                continue;
            };
            match rest.split_once('/') {
                Some((child, _)) => {
                    children.insert(child.to_string(), true);
                }
                None => {
                    children.entry(rest.to_string()).or_insert(false);
                }
            }
        }

        if children.is_empty() && !dir.is_empty() {
            return Err(StoreError::NotFound(dir));
        }
        Ok(children
            .into_iter()
            .map(|(name, is_directory)| DirEntry { name, is_directory })
            .collect())
    }

    async fn read_file(&self, repo: &RepoCoordinates, path: &str) -> Result<String, StoreError> {
        let path = normalize(path);
        self.read_log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.clone());

        let failing = self
            .failing_reads
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&(repo.clone(), path.clone()));
        if failing {
            return Err(StoreError::Api {
                status: 500,
                message: format!("injected read failure for {path}"),
            });
        }

        self.get(repo, &path).ok_or(StoreError::NotFound(path))
    }

    async fn write_file(
        &self,
        repo: &RepoCoordinates,
        path: &str,
        content: &str,
        _message: &str,
    ) -> Result<(), StoreError> {
        self.insert(repo, path, content);
        Ok(())
    }

    async fn delete_folder(
        &self,
        repo: &RepoCoordinates,
        path: &str,
        _message: &str,
    ) -> Result<(), StoreError> {
        let prefix = format!("{}/", normalize(path));
        if let Some(tree) = self
            .repos
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(repo)
        {
            tree.retain(|key, _| !key.starts_with(&prefix));
        }
        Ok(())
    }
}
