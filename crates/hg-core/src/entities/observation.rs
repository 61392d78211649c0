use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{SanitationAccess, Symptom, WaterSource};
use crate::errors::{CoreError, require_non_blank};

/// A household submission from a field agent, before grading.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HouseholdObservation {
    #[serde(default)]
    pub household_id: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub asha_worker: String,
    #[serde(default)]
    pub symptoms: BTreeSet<Symptom>,
    #[serde(default)]
    pub water_source: WaterSource,
    #[serde(default)]
    pub sanitation_access: SanitationAccess,
    #[serde(default)]
    pub notes: String,
}

impl HouseholdObservation {
    /// Check required fields before anything is stored.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the household id, location, or
    /// reporting agent is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_non_blank("household_id", &self.household_id)?;
        require_non_blank("location", &self.location)?;
        require_non_blank("asha_worker", &self.asha_worker)?;
        Ok(())
    }
}
