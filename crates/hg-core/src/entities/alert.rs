use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AlertSource, AlertStatus, Channel, Severity};
use crate::errors::{CoreError, require_non_blank};

/// A notifiable event. Status only ever moves `active → resolved`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Alert {
    pub id: String,
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub location: String,
    pub status: AlertStatus,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub channels: BTreeSet<Channel>,
    pub source: AlertSource,
}

/// Fields supplied when raising an alert; id, timestamp, and status are
/// assigned by the alert engine.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewAlert {
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub location: String,
    #[serde(default)]
    pub channels: BTreeSet<Channel>,
    #[serde(default)]
    pub source: AlertSource,
}

impl NewAlert {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the title or message is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_non_blank("title", &self.title)?;
        require_non_blank("message", &self.message)?;
        Ok(())
    }
}
