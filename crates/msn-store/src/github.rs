//! GitHub contents API store.
//!
//! - list:   `GET    /repos/{owner}/{repo}/contents/{path}` (array response)
//! - read:   `GET    /repos/{owner}/{repo}/contents/{path}` (base64 blob)
//! - write:  `PUT    /repos/{owner}/{repo}/contents/{path}` (+ `sha` when updating)
//! - delete: `DELETE /repos/{owner}/{repo}/contents/{path}` per file, with `sha`
//!
//! Every write and delete is its own commit on the default branch.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use msn_config::GitHubConfig;
use msn_core::RepoCoordinates;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::http::check_response;
use crate::{DirEntry, FileStore};

#[derive(Debug, Deserialize)]
struct ContentEntry {
    name: String,
    path: String,
    sha: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct FileContent {
    sha: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    encoding: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentsResponse {
    Directory(Vec<ContentEntry>),
    File(FileContent),
}

#[derive(Serialize)]
struct PutFileRequest<'a> {
    message: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
}

#[derive(Serialize)]
struct DeleteFileRequest<'a> {
    message: &'a str,
    sha: &'a str,
}

/// [`FileStore`] backed by the GitHub REST contents API.
pub struct GitHubStore {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl GitHubStore {
    /// Create a store from GitHub configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn from_config(config: &GitHubConfig) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            token: config.token.clone(),
        })
    }

    fn contents_url(&self, repo: &RepoCoordinates, path: &str) -> String {
        let encoded_path = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!(
            "{}/repos/{}/{}/contents/{encoded_path}",
            self.base_url,
            urlencoding::encode(&repo.owner),
            urlencoding::encode(&repo.name),
        )
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");
        if self.token.is_empty() {
            builder
        } else {
            builder.bearer_auth(&self.token)
        }
    }

    async fn get_contents(
        &self,
        repo: &RepoCoordinates,
        path: &str,
    ) -> Result<ContentsResponse, StoreError> {
        let url = self.contents_url(repo, path);
        let resp = check_response(
            self.request(reqwest::Method::GET, &url).send().await?,
            path,
        )
        .await?;
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| StoreError::Parse(format!("{path}: {e}")))
    }

    /// Blob sha of an existing file, `None` if the file does not exist.
    async fn existing_sha(
        &self,
        repo: &RepoCoordinates,
        path: &str,
    ) -> Result<Option<String>, StoreError> {
        match self.get_contents(repo, path).await {
            Ok(ContentsResponse::File(file)) => Ok(Some(file.sha)),
            Ok(ContentsResponse::Directory(_)) => Err(StoreError::Parse(format!(
                "{path}: expected a file, found a directory"
            ))),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Collect `(path, sha)` for every file beneath `path`.
    async fn collect_files(
        &self,
        repo: &RepoCoordinates,
        path: &str,
    ) -> Result<Vec<(String, String)>, StoreError> {
        let mut files = Vec::new();
        let mut pending = vec![path.to_string()];
        while let Some(dir) = pending.pop() {
            match self.get_contents(repo, &dir).await? {
                ContentsResponse::Directory(entries) => {
                    for entry in entries {
                        if entry.kind == "dir" {
                            pending.push(entry.path);
                        } else {
                            files.push((entry.path, entry.sha));
                        }
                    }
                }
                ContentsResponse::File(file) => files.push((dir, file.sha)),
            }
        }
        Ok(files)
    }
}

#[async_trait]
impl FileStore for GitHubStore {
    async fn list_directory(
        &self,
        repo: &RepoCoordinates,
        path: &str,
    ) -> Result<Vec<DirEntry>, StoreError> {
        match self.get_contents(repo, path).await? {
            ContentsResponse::Directory(entries) => Ok(entries
                .into_iter()
                .map(|entry| DirEntry {
                    is_directory: entry.kind == "dir",
                    name: entry.name,
                })
                .collect()),
            ContentsResponse::File(_) => Err(StoreError::Parse(format!(
                "{path}: expected a directory, found a file"
            ))),
        }
    }

    async fn read_file(&self, repo: &RepoCoordinates, path: &str) -> Result<String, StoreError> {
        match self.get_contents(repo, path).await? {
            ContentsResponse::File(file) => decode_content(path, &file),
            ContentsResponse::Directory(_) => Err(StoreError::Parse(format!(
                "{path}: expected a file, found a directory"
            ))),
        }
    }

    async fn write_file(
        &self,
        repo: &RepoCoordinates,
        path: &str,
        content: &str,
        message: &str,
    ) -> Result<(), StoreError> {
        let sha = self.existing_sha(repo, path).await?;
        tracing::debug!(%repo, path, update = sha.is_some(), "writing file");

        let body = PutFileRequest {
            message,
            content: base64::engine::general_purpose::STANDARD.encode(content),
            sha,
        };
        let url = self.contents_url(repo, path);
        check_response(
            self.request(reqwest::Method::PUT, &url)
                .json(&body)
                .send()
                .await?,
            path,
        )
        .await?;
        Ok(())
    }

    async fn delete_folder(
        &self,
        repo: &RepoCoordinates,
        path: &str,
        message: &str,
    ) -> Result<(), StoreError> {
        let files = match self.collect_files(repo, path).await {
            Ok(files) => files,
            Err(StoreError::NotFound(_)) => {
                tracing::debug!(%repo, path, "folder already absent");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        for (file_path, sha) in files {
            let url = self.contents_url(repo, &file_path);
            let body = DeleteFileRequest { message, sha: &sha };
            check_response(
                self.request(reqwest::Method::DELETE, &url)
                    .json(&body)
                    .send()
                    .await?,
                &file_path,
            )
            .await?;
        }
        Ok(())
    }
}

fn decode_content(path: &str, file: &FileContent) -> Result<String, StoreError> {
    let content = file.content.as_deref().unwrap_or_default();
    match file.encoding.as_deref() {
        Some("base64") => {
            // GitHub wraps base64 payloads at 60 columns.
            let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(compact)
                .map_err(|e| StoreError::Decode(format!("{path}: {e}")))?;
            String::from_utf8(bytes).map_err(|e| StoreError::Decode(format!("{path}: {e}")))
        }
        Some("none") => Err(StoreError::Decode(format!(
            "{path}: file too large for the contents API"
        ))),
        Some(other) => Err(StoreError::Decode(format!(
            "{path}: unsupported encoding '{other}'"
        ))),
        None => Ok(content.to_string()),
    }
}
