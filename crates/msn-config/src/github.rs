//! GitHub API configuration.

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    String::from("https://api.github.com")
}

fn default_user_agent() -> String {
    String::from("msn/0.1")
}

const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubConfig {
    /// Personal access token or app installation token.
    #[serde(default)]
    pub token: String,

    /// REST API base URL. Override for GitHub Enterprise.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_url: default_api_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GitHubConfig {
    /// Check if a token is available for authenticated requests.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.token.is_empty()
    }

    /// API base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}
