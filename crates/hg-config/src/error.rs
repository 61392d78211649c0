//! Errors raised while loading or validating configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source failed to parse or a value had the wrong type.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A section was partly filled in but lacks a field it needs.
    #[error("[{section}] is incomplete: set {missing} or clear the section")]
    NotConfigured { section: String, missing: String },

    /// A value parsed but is outside what the engine accepts.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
