use msn_config::MissionConfig;

/// Commit message from `--message`, falling back to `general.commit_message`.
pub fn commit_message<'a>(explicit: Option<&'a str>, config: &'a MissionConfig) -> &'a str {
    explicit.unwrap_or(&config.general.commit_message)
}
