//! IoT case synthesis rules.
//!
//! An anomalous sensor reading can stand in for an unreported household case.
//! Water-quality sensors outside their own range suggest water-borne illness;
//! air-quality sensors above AQI 100 suggest pollution-related illness. Other
//! sensor kinds never synthesize.

use std::collections::BTreeSet;

use hg_core::entities::{HouseholdObservation, NewAlert, SensorRecord};
use hg_core::enums::{AlertSource, Channel, SanitationAccess, SensorKind, Severity, Symptom, WaterSource};
use hg_core::ids::iot_household_id;

/// Reporting agent recorded on synthesized cases.
pub const IOT_AGENT: &str = "IoT System";

/// Air-quality index above which a case is synthesized.
pub const AIR_QUALITY_LIMIT: f64 = 100.0;

/// Symptoms and explanation attached to a synthesized case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseProfile {
    pub symptoms: [Symptom; 3],
    pub risk_factor: &'static str,
}

const WATER_BORNE: CaseProfile = CaseProfile {
    symptoms: [Symptom::Diarrhea, Symptom::Nausea, Symptom::AbdominalPain],
    risk_factor: "Poor water quality detected",
};

const AIR_POLLUTION: CaseProfile = CaseProfile {
    symptoms: [Symptom::Headache, Symptom::Nausea, Symptom::Fatigue],
    risk_factor: "High air pollution levels",
};

/// The profile a sensor's current reading implies, if any.
#[must_use]
pub fn profile_for(sensor: &SensorRecord) -> Option<CaseProfile> {
    match sensor.kind {
        SensorKind::WaterQuality if sensor.is_out_of_range() => Some(WATER_BORNE),
        SensorKind::AirQuality if sensor.value > AIR_QUALITY_LIMIT => Some(AIR_POLLUTION),
        _ => None,
    }
}

/// Household observation for synthesized case number `case_number`.
#[must_use]
pub fn observation_for(
    sensor: &SensorRecord,
    profile: CaseProfile,
    case_number: usize,
) -> HouseholdObservation {
    HouseholdObservation {
        household_id: iot_household_id(),
        location: sensor.location.clone(),
        asha_worker: IOT_AGENT.to_string(),
        symptoms: profile.symptoms.into_iter().collect(),
        water_source: if sensor.kind == SensorKind::WaterQuality {
            WaterSource::MonitoredSource
        } else {
            WaterSource::Unknown
        },
        sanitation_access: SanitationAccess::Unknown,
        notes: format!(
            "Case {case_number}: IoT-detected case - {}. Sensor: {}",
            profile.risk_factor, sensor.name
        ),
    }
}

/// Alert announcing a synthesized case.
#[must_use]
pub fn case_alert(sensor: &SensorRecord, profile: CaseProfile, case_number: usize) -> NewAlert {
    NewAlert {
        title: format!("IoT Health Alert - Case {case_number}"),
        message: format!(
            "{} in {}. Automated case generated.",
            profile.risk_factor, sensor.location
        ),
        severity: Severity::High,
        location: sensor.location.clone(),
        channels: BTreeSet::from([Channel::Dashboard, Channel::Sms]),
        source: AlertSource::Iot,
    }
}

/// Alert for a reading outside the sensor's range.
#[must_use]
pub fn range_alert(sensor: &SensorRecord) -> NewAlert {
    let unit = &sensor.unit;
    NewAlert {
        title: format!("{} Alert", sensor.name),
        message: format!(
            "{name} reading ({value} {unit}) is outside normal range ({min}-{max} {unit})",
            name = sensor.name,
            value = sensor.value,
            min = sensor.threshold.min,
            max = sensor.threshold.max,
        ),
        severity: Severity::High,
        location: sensor.location.clone(),
        channels: BTreeSet::from([Channel::Dashboard, Channel::Sms]),
        source: AlertSource::Iot,
    }
}
