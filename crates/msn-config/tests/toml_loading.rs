//! Integration tests for TOML and environment configuration loading.
//!
//! Uses `figment::Jail` for sandboxed file and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use msn_config::{ConfigError, MissionConfig};

#[test]
fn loads_github_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[github]
token = "ghp_toml"
api_url = "https://github.example.com/api/v3"
user_agent = "msn-test"
timeout_secs = 5
"#,
        )?;

        let config: MissionConfig = Figment::from(Serialized::defaults(MissionConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.github.token, "ghp_toml");
        assert_eq!(config.github.api_url, "https://github.example.com/api/v3");
        assert_eq!(config.github.user_agent, "msn-test");
        assert_eq!(config.github.timeout_secs, 5);
        assert!(config.github.is_configured());
        Ok(())
    });
}

#[test]
fn loads_general_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
max_tasks = 8
commit_message = "Sync from editor"
teacher_mode = true
"#,
        )?;

        let config: MissionConfig = Figment::from(Serialized::defaults(MissionConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.general.max_tasks, 8);
        assert_eq!(config.general.commit_message, "Sync from editor");
        assert!(config.general.teacher_mode);
        assert!(!config.github.is_configured());
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".msn")?;
        jail.create_file(
            ".msn/config.toml",
            r#"
[general]
max_tasks = 12
"#,
        )?;

        let config = MissionConfig::load().expect("config loads");
        assert_eq!(config.general.max_tasks, 12);
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[github]
token = "ghp_toml"
"#,
        )?;
        jail.set_env("MSN_GITHUB__TOKEN", "ghp_env");

        let config: MissionConfig = Figment::from(Serialized::defaults(MissionConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("MSN_").split("__"))
            .extract()?;

        assert_eq!(config.github.token, "ghp_env");
        Ok(())
    });
}

#[test]
fn load_rejects_invalid_values_from_env() {
    Jail::expect_with(|jail| {
        jail.set_env("MSN_GENERAL__MAX_TASKS", "0");

        let err = MissionConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}
