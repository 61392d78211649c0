use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{SensorKind, SensorStatus};
use crate::errors::CoreError;

/// Acceptable reading range, inclusive on both ends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Threshold {
    pub min: f64,
    pub max: f64,
}

impl Threshold {
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Both bounds finite and `min <= max`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` describing the bad range.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(self.min.is_finite() && self.max.is_finite()) {
            return Err(CoreError::validation(format!(
                "threshold bounds must be finite, got {}-{}",
                self.min, self.max
            )));
        }
        if self.min > self.max {
            return Err(CoreError::validation(format!(
                "threshold min {} exceeds max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// One entry of a sensor's history window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SensorReading {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// A field sensor and its recent telemetry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SensorRecord {
    pub id: String,
    pub name: String,
    pub kind: SensorKind,
    pub location: String,
    pub status: SensorStatus,
    pub value: f64,
    pub unit: String,
    pub threshold: Threshold,
    pub last_reading_at: DateTime<Utc>,
    /// Oldest first.
    #[serde(default)]
    pub readings: VecDeque<SensorReading>,
}

impl SensorRecord {
    /// Whether the latest value lies outside the acceptable range.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        !self.threshold.contains(self.value)
    }
}
