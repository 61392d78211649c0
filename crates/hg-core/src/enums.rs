//! Vocabulary enums, status enums, and journal kinds for HealthGuard.
//!
//! Status enums with state machines provide `allowed_next_states()` to enforce
//! valid transitions at the application layer. Wire names follow the strings
//! the field forms and sensor gateways already send (`"Abdominal Pain"`,
//! `"open-defecation"`, `"water_quality"`, `"WhatsApp"`).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// Lowercase and strip separators so `"abdominal-pain"`, `"Abdominal Pain"`
/// and `"AbdominalPain"` all compare equal.
fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

// ---------------------------------------------------------------------------
// Symptom
// ---------------------------------------------------------------------------

/// Fixed symptom vocabulary collected by the household form.
///
/// Declaration order is the canonical vocabulary order; `Ord` follows it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum Symptom {
    Diarrhea,
    Vomiting,
    Fever,
    #[serde(rename = "Abdominal Pain", alias = "AbdominalPain")]
    AbdominalPain,
    Dehydration,
    Nausea,
    Headache,
    Fatigue,
}

impl Symptom {
    /// Every symptom in canonical vocabulary order.
    pub const ALL: [Self; 8] = [
        Self::Diarrhea,
        Self::Vomiting,
        Self::Fever,
        Self::AbdominalPain,
        Self::Dehydration,
        Self::Nausea,
        Self::Headache,
        Self::Fatigue,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Diarrhea => "Diarrhea",
            Self::Vomiting => "Vomiting",
            Self::Fever => "Fever",
            Self::AbdominalPain => "Abdominal Pain",
            Self::Dehydration => "Dehydration",
            Self::Nausea => "Nausea",
            Self::Headache => "Headache",
            Self::Fatigue => "Fatigue",
        }
    }
}

impl FromStr for Symptom {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let key = normalize(raw);
        Self::ALL
            .into_iter()
            .find(|symptom| normalize(symptom.as_str()) == key)
            .ok_or_else(|| CoreError::validation(format!("unknown symptom '{raw}'")))
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// WaterSource
// ---------------------------------------------------------------------------

/// Primary household water source.
///
/// Unrecognized wire values deserialize to `Unknown`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum WaterSource {
    Well,
    River,
    Pond,
    Piped,
    Rainwater,
    Other,
    MonitoredSource,
    #[default]
    #[serde(other)]
    Unknown,
}

impl WaterSource {
    const ALL: [Self; 8] = [
        Self::Well,
        Self::River,
        Self::Pond,
        Self::Piped,
        Self::Rainwater,
        Self::Other,
        Self::MonitoredSource,
        Self::Unknown,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Well => "well",
            Self::River => "river",
            Self::Pond => "pond",
            Self::Piped => "piped",
            Self::Rainwater => "rainwater",
            Self::Other => "other",
            Self::MonitoredSource => "monitored-source",
            Self::Unknown => "unknown",
        }
    }
}

impl FromStr for WaterSource {
    type Err = CoreError;

    /// Strict parse for operator input; serde stays lenient.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let key = normalize(raw);
        Self::ALL
            .into_iter()
            .find(|source| normalize(source.as_str()) == key)
            .ok_or_else(|| CoreError::validation(format!("unknown water source '{raw}'")))
    }
}

impl fmt::Display for WaterSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SanitationAccess
// ---------------------------------------------------------------------------

/// Household sanitation facility. Unrecognized wire values become `Unknown`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum SanitationAccess {
    PrivateToilet,
    SharedToilet,
    CommunityToilet,
    OpenDefecation,
    #[default]
    #[serde(other)]
    Unknown,
}

impl SanitationAccess {
    const ALL: [Self; 5] = [
        Self::PrivateToilet,
        Self::SharedToilet,
        Self::CommunityToilet,
        Self::OpenDefecation,
        Self::Unknown,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PrivateToilet => "private-toilet",
            Self::SharedToilet => "shared-toilet",
            Self::CommunityToilet => "community-toilet",
            Self::OpenDefecation => "open-defecation",
            Self::Unknown => "unknown",
        }
    }
}

impl FromStr for SanitationAccess {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let key = normalize(raw);
        Self::ALL
            .into_iter()
            .find(|access| normalize(access.as_str()) == key)
            .ok_or_else(|| CoreError::validation(format!("unknown sanitation access '{raw}'")))
    }
}

impl fmt::Display for SanitationAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DataSource
// ---------------------------------------------------------------------------

/// Where a health record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Manual,
    Iot,
}

impl DataSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Iot => "iot",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RiskBand
// ---------------------------------------------------------------------------

/// Band derived from a 0–100 risk score.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskBand {
    /// `>= 85` critical, `>= 70` high, `>= 40` medium, otherwise low.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            85.. => Self::Critical,
            70..=84 => Self::High,
            40..=69 => Self::Medium,
            _ => Self::Low,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SensorKind
// ---------------------------------------------------------------------------

/// Sensor category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    WaterQuality,
    Weather,
    AirQuality,
    FlowRate,
}

impl SensorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WaterQuality => "water_quality",
            Self::Weather => "weather",
            Self::AirQuality => "air_quality",
            Self::FlowRate => "flow_rate",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SensorStatus
// ---------------------------------------------------------------------------

/// Operational status of a sensor.
///
/// ```text
/// online ⇄ warning     (range check on every reading)
/// offline              (administrative, preserved by readings)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SensorStatus {
    Online,
    Warning,
    Offline,
}

impl SensorStatus {
    /// Status after a reading whose range check produced `in_range`.
    #[must_use]
    pub const fn after_reading(self, in_range: bool) -> Self {
        match self {
            Self::Offline => Self::Offline,
            Self::Online | Self::Warning if in_range => Self::Online,
            Self::Online | Self::Warning => Self::Warning,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Warning => "warning",
            Self::Offline => "offline",
        }
    }
}

impl fmt::Display for SensorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Alert severity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AlertStatus
// ---------------------------------------------------------------------------

/// Status of an alert.
///
/// ```text
/// active → resolved
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Active,
    Resolved,
}

impl AlertStatus {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Active => &[Self::Resolved],
            Self::Resolved => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AlertSource
// ---------------------------------------------------------------------------

/// What produced an alert.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum AlertSource {
    #[default]
    Manual,
    Iot,
    System,
}

impl AlertSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Iot => "iot",
            Self::System => "system",
        }
    }
}

impl fmt::Display for AlertSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// Communication channel an alert targets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum Channel {
    #[serde(rename = "SMS")]
    Sms,
    WhatsApp,
    Email,
    Dashboard,
}

impl Channel {
    const ALL: [Self; 4] = [Self::Sms, Self::WhatsApp, Self::Email, Self::Dashboard];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sms => "SMS",
            Self::WhatsApp => "WhatsApp",
            Self::Email => "Email",
            Self::Dashboard => "Dashboard",
        }
    }
}

impl FromStr for Channel {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let key = normalize(raw);
        Self::ALL
            .into_iter()
            .find(|channel| normalize(channel.as_str()) == key)
            .ok_or_else(|| CoreError::validation(format!("unknown channel '{raw}'")))
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Journal kinds
// ---------------------------------------------------------------------------

/// Kind of mutation recorded in the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum JournalOp {
    Create,
    Resolve,
    Reading,
}

/// Registry an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    HealthRecord,
    Sensor,
    Alert,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HealthRecord => "health_record",
            Self::Sensor => "sensor",
            Self::Alert => "alert",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
