use std::sync::Arc;

use anyhow::Context;
use msn_config::MissionConfig;
use msn_store::{FileStore, GitHubStore};

/// Load layered configuration, honouring a `.env` file in the working
/// directory.
pub fn load_config() -> anyhow::Result<MissionConfig> {
    MissionConfig::load_with_dotenv().context("failed to load msn configuration")
}

/// Store for commands that talk to GitHub. Fails early without a token.
pub fn github_store(config: &MissionConfig) -> anyhow::Result<Arc<dyn FileStore>> {
    let github = config
        .require_github()
        .context("set MSN_GITHUB__TOKEN or github.token in .msn/config.toml")?;
    let store = GitHubStore::from_config(github).context("failed to build GitHub client")?;
    Ok(Arc::new(store))
}
