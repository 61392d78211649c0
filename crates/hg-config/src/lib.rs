//! # hg-config
//!
//! Layered configuration loading for HealthGuard using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`HEALTHGUARD_*` prefix, `__` as separator)
//! 2. Project-level `.healthguard/config.toml`
//! 3. User-level `~/.config/healthguard/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `HEALTHGUARD_NOTIFY__PHONE` -> `notify.phone`,
//! `HEALTHGUARD_MONITOR__SYNTHESIS_SEED` -> `monitor.synthesis_seed`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use hg_config::GuardConfig;
//!
//! let config = GuardConfig::load_with_dotenv().expect("config");
//!
//! if config.notify.is_configured() {
//!     println!("Gateway: {}", config.notify.gateway_url);
//! }
//! ```

mod error;
mod general;
mod monitor;
mod notify;
mod storage;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use monitor::MonitorConfig;
pub use notify::NotifyConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config location, relative to the working directory.
pub const LOCAL_CONFIG_PATH: &str = ".healthguard/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GuardConfig {
    #[serde(default)]
    pub notify: NotifyConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl GuardConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source fails to parse, or
    /// `ConfigError::InvalidValue` if the merged values fail [`Self::validate`].
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
    /// Public so tests can inspect the figment or layer extra providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("HEALTHGUARD_").split("__"))
    }

    /// Reject values the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a synthesis probability outside
    /// `[0, 1]`, a zero history capacity, or a zero delivery timeout, and
    /// `ConfigError::NotConfigured` for a gateway URL with no destination phone.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.notify.gateway_url.is_empty() && self.notify.phone.trim().is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "notify".into(),
                missing: "phone".into(),
            });
        }
        if self.notify.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "notify.timeout_secs".into(),
                reason: "must be at least 1".into(),
            });
        }
        let probability = self.monitor.synthesis_probability;
        if !(0.0..=1.0).contains(&probability) {
            return Err(ConfigError::InvalidValue {
                field: "monitor.synthesis_probability".into(),
                reason: format!("{probability} is outside [0, 1]"),
            });
        }
        if self.monitor.history_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "monitor.history_capacity".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("healthguard").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GuardConfig::default();
        assert!(!config.notify.is_configured());
        assert_eq!(config.monitor.history_capacity, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn figment_builds_without_files() {
        let config: GuardConfig = GuardConfig::figment()
            .extract()
            .expect("should extract defaults");
        assert_eq!(config.general.default_limit, 20);
        assert!(config.storage.journal_enabled);
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        let mut config = GuardConfig::default();
        config.monitor.synthesis_probability = 1.5;
        let err = config.validate().expect_err("probability > 1");
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "monitor.synthesis_probability"));
    }

    #[test]
    fn gateway_without_phone_is_not_configured() {
        let mut config = GuardConfig::default();
        config.notify.gateway_url = "https://sms.example.org/send".into();
        config.notify.phone = String::new();
        let err = config.validate().expect_err("phone is required");
        assert_eq!(
            err.to_string(),
            "[notify] is incomplete: set phone or clear the section"
        );
    }

    #[test]
    fn zero_history_capacity_is_rejected() {
        let mut config = GuardConfig::default();
        config.monitor.history_capacity = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
