//! Derived read models returned by the engine and printed by `hgd`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Symptom, WaterSource};

/// Record counts per risk band.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RiskDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SymptomCount {
    pub name: Symptom,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WaterSourceCount {
    pub source: WaterSource,
    pub count: usize,
}

/// Sensor fleet health.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct IotMetrics {
    pub online_sensors: usize,
    pub offline_sensors: usize,
    pub warnings: usize,
    /// Percentage of sensors not offline, one decimal place.
    pub uptime: f64,
}

/// Aggregate view over all health records and sensors, recomputed per call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AnalyticsSnapshot {
    pub total_records: usize,
    pub risk_distribution: RiskDistribution,
    /// Top five, most frequent first.
    pub common_symptoms: Vec<SymptomCount>,
    /// Most frequent first.
    pub water_source_distribution: Vec<WaterSourceCount>,
    pub iot_metrics: IotMetrics,
}
