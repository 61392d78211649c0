//! Notification delivery configuration.

use serde::{Deserialize, Serialize};

fn default_phone() -> String {
    String::from("9392995909")
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_signature() -> String {
    String::from("HealthGuard System")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotifyConfig {
    /// Destination phone number for SMS and WhatsApp deliveries.
    #[serde(default = "default_phone")]
    pub phone: String,

    /// Messaging gateway endpoint. Empty means deliveries are only logged.
    #[serde(default)]
    pub gateway_url: String,

    /// Per-delivery timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Sign-off line of every rendered message.
    #[serde(default = "default_signature")]
    pub signature: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            phone: default_phone(),
            gateway_url: String::new(),
            timeout_secs: default_timeout_secs(),
            signature: default_signature(),
        }
    }
}

impl NotifyConfig {
    /// Whether deliveries go to a real gateway.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.gateway_url.is_empty() && !self.phone.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_log_only() {
        let config = NotifyConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.phone, "9392995909");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.signature, "HealthGuard System");
    }

    #[test]
    fn configured_with_gateway_url() {
        let config = NotifyConfig {
            gateway_url: "https://gateway.example/send".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
    }

    #[test]
    fn not_configured_without_phone() {
        let config = NotifyConfig {
            gateway_url: "https://gateway.example/send".into(),
            phone: String::new(),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }
}
