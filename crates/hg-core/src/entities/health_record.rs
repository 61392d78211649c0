use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{DataSource, RiskBand, SanitationAccess, Symptom, WaterSource};

/// A graded household health observation.
///
/// Symptoms and risk score are fixed at creation; corrections create a new
/// record. `risk_score` is `None` only for unscored legacy imports.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HealthRecord {
    pub id: String,
    pub household_id: String,
    pub location: String,
    pub asha_worker: String,
    pub symptoms: BTreeSet<Symptom>,
    pub water_source: WaterSource,
    pub sanitation_access: SanitationAccess,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub risk_score: Option<u8>,
    pub data_source: DataSource,
}

impl HealthRecord {
    /// Band for analytics. Unscored records count as low.
    #[must_use]
    pub fn risk_band(&self) -> RiskBand {
        RiskBand::from_score(self.risk_score.unwrap_or(0))
    }
}
