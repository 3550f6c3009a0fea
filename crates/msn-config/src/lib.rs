//! # msn-config
//!
//! Layered configuration loading for the mission sync tools using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`MSN_*` prefix, `__` as separator)
//! 2. Project-level `.msn/config.toml`
//! 3. User-level `~/.config/msn/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `MSN_GITHUB__TOKEN` -> `github.token`,
//! `MSN_GENERAL__MAX_TASKS` -> `general.max_tasks`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use msn_config::MissionConfig;
//!
//! let config = MissionConfig::load_with_dotenv().expect("config");
//! if config.github.is_configured() {
//!     println!("API: {}", config.github.base_url());
//! }
//! ```

mod error;
mod general;
mod github;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use github::GitHubConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MissionConfig {
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl MissionConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is out
    /// of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path().filter(|path| path.exists()) {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".msn/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("MSN_").split("__"))
    }

    /// Reject values that would make the tools misbehave.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.max_tasks == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.max_tasks".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.github.api_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "github.api_url".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Require a GitHub token for commands that talk to the remote store.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] if no token is set.
    pub fn require_github(&self) -> Result<&GitHubConfig, ConfigError> {
        if self.github.is_configured() {
            Ok(&self.github)
        } else {
            Err(ConfigError::NotConfigured {
                section: "github".into(),
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("msn").join("config.toml"))
    }
}
