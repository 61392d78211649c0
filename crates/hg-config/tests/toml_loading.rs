//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use hg_config::GuardConfig;

#[test]
fn loads_notify_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[notify]
phone = "9100000000"
gateway_url = "https://gateway.example/send"
timeout_secs = 3
signature = "Jorhat District Health"
"#,
        )?;

        let config: GuardConfig = Figment::from(Serialized::defaults(GuardConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.notify.phone, "9100000000");
        assert_eq!(config.notify.gateway_url, "https://gateway.example/send");
        assert_eq!(config.notify.timeout_secs, 3);
        assert_eq!(config.notify.signature, "Jorhat District Health");
        assert!(config.notify.is_configured());
        Ok(())
    });
}

#[test]
fn partial_section_keeps_remaining_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[monitor]
synthesis_seed = 42
",
        )?;

        let config: GuardConfig = Figment::from(Serialized::defaults(GuardConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.monitor.synthesis_seed, Some(42));
        assert_eq!(config.monitor.history_capacity, 7);
        assert!((config.monitor.synthesis_probability - 0.3).abs() < f64::EPSILON);
        Ok(())
    });
}

#[test]
fn project_config_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".healthguard")?;
        jail.create_file(
            ".healthguard/config.toml",
            r#"
[storage]
state_path = "data/state.json"
journal_enabled = false

[general]
default_limit = 5
"#,
        )?;

        let config = GuardConfig::load().expect("config loads");
        assert_eq!(config.storage.state_path, "data/state.json");
        assert!(!config.storage.journal_enabled);
        assert_eq!(config.storage.journal_dir, ".healthguard/journal");
        assert_eq!(config.general.default_limit, 5);
        Ok(())
    });
}

#[test]
fn env_beats_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[notify]
phone = "from-toml"
"#,
        )?;
        jail.set_env("HEALTHGUARD_NOTIFY__PHONE", "from-env");

        let config: GuardConfig = Figment::from(Serialized::defaults(GuardConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("HEALTHGUARD_").split("__"))
            .extract()?;

        assert_eq!(config.notify.phone, "from-env");
        Ok(())
    });
}

#[test]
fn invalid_probability_in_project_file_fails_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".healthguard")?;
        jail.create_file(
            ".healthguard/config.toml",
            r"
[monitor]
synthesis_probability = 2.0
",
        )?;

        let err = GuardConfig::load().expect_err("probability must be validated");
        assert!(err.to_string().contains("monitor.synthesis_probability"));
        Ok(())
    });
}
