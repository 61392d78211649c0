//! Engine error types for hg-engine.

use hg_core::errors::CoreError;
use thiserror::Error;

/// Errors from engine operations.
///
/// Notification delivery failures never surface here; the dispatcher logs
/// them (see [`crate::notify::DeliveryError`]).
#[derive(Debug, Error)]
pub enum EngineError {
    /// Not found, invalid transition, or validation failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Appending to the mutation journal failed. Nothing was committed.
    #[error("Journal write failed: {0}")]
    Journal(String),

    /// The state file is missing or inconsistent.
    #[error("State error: {0}")]
    State(String),

    /// The engine could not be assembled from its configuration.
    #[error("Setup error: {0}")]
    Setup(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    pub fn not_found(entity_type: &str, id: &str) -> Self {
        Self::Core(CoreError::not_found(entity_type, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Core(CoreError::validation(message))
    }

    /// Whether this is a `NotFound` lookup failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Core(CoreError::NotFound { .. }))
    }
}
