//! Heuristic household risk scoring.
//!
//! Pure and deterministic: the same symptoms and environment always produce
//! the same score.

use std::collections::BTreeSet;

use hg_core::entities::HouseholdObservation;
use hg_core::enums::{SanitationAccess, Symptom, WaterSource};

/// Upper bound of every score.
pub const MAX_SCORE: u8 = 100;

/// Score at or above which a new record raises an alert.
pub const ALERT_THRESHOLD: u8 = 70;

/// Score at or above which that alert is critical instead of high.
pub const CRITICAL_THRESHOLD: u8 = 85;

/// Weight of a single symptom.
#[must_use]
pub const fn symptom_weight(symptom: Symptom) -> u32 {
    match symptom {
        Symptom::Diarrhea | Symptom::Vomiting | Symptom::Dehydration => 25,
        Symptom::Fever | Symptom::AbdominalPain => 15,
        Symptom::Nausea | Symptom::Headache | Symptom::Fatigue => 10,
    }
}

#[must_use]
pub const fn water_weight(source: WaterSource) -> u32 {
    match source {
        WaterSource::Pond | WaterSource::River => 20,
        WaterSource::Well => 10,
        _ => 0,
    }
}

#[must_use]
pub const fn sanitation_weight(access: SanitationAccess) -> u32 {
    match access {
        SanitationAccess::OpenDefecation => 25,
        SanitationAccess::CommunityToilet => 15,
        _ => 0,
    }
}

/// Risk score in `0..=100` for a symptom set and household environment.
#[must_use]
pub fn score(
    symptoms: &BTreeSet<Symptom>,
    water_source: WaterSource,
    sanitation_access: SanitationAccess,
) -> u8 {
    let sum: u32 = symptoms.iter().copied().map(symptom_weight).sum::<u32>()
        + water_weight(water_source)
        + sanitation_weight(sanitation_access);
    u8::try_from(sum.min(u32::from(MAX_SCORE))).unwrap_or(MAX_SCORE)
}

/// Convenience wrapper over [`score`] for a whole observation.
#[must_use]
pub fn score_observation(observation: &HouseholdObservation) -> u8 {
    score(
        &observation.symptoms,
        observation.water_source,
        observation.sanitation_access,
    )
}
