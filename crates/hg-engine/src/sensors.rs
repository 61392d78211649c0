//! Sensor registry, reading ingestion, and IoT case synthesis.
//!
//! A reading updates the sensor, raises a range alert when the sensor ends up
//! in `warning`, and then asks the synthesis trigger whether to generate a
//! health case. Each step runs after the previous registry lock is released:
//! sensor update, range alert, synthesized case, case alert.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use hg_core::entities::{HealthRecord, SensorReading, SensorRecord};
use hg_core::enums::{DataSource, EntityKind, JournalOp, SensorStatus};
use hg_core::errors::require_non_blank;
use hg_core::responses::IotMetrics;

use crate::alerts::AlertEngine;
use crate::cases::CaseStore;
use crate::error::EngineError;
use crate::journal::JournalWriter;
use crate::synthesis::{case_alert, observation_for, profile_for, range_alert};
use crate::trigger::SynthesisTrigger;

pub struct SensorMonitor {
    sensors: RwLock<Vec<SensorRecord>>,
    history_capacity: usize,
    alerts: Arc<AlertEngine>,
    cases: Arc<CaseStore>,
    trigger: Arc<dyn SynthesisTrigger>,
    journal: Arc<JournalWriter>,
}

impl SensorMonitor {
    /// Build the registry around previously persisted sensors.
    ///
    /// `history_capacity` is raised to at least 1.
    #[must_use]
    pub fn new(
        sensors: Vec<SensorRecord>,
        history_capacity: usize,
        alerts: Arc<AlertEngine>,
        cases: Arc<CaseStore>,
        trigger: Arc<dyn SynthesisTrigger>,
        journal: Arc<JournalWriter>,
    ) -> Self {
        Self {
            sensors: RwLock::new(sensors),
            history_capacity: history_capacity.max(1),
            alerts,
            cases,
            trigger,
            journal,
        }
    }

    #[must_use]
    pub const fn history_capacity(&self) -> usize {
        self.history_capacity
    }

    /// Add a sensor to the registry.
    ///
    /// History beyond capacity is trimmed from the oldest end, and the status
    /// of a sensor that is not offline is recomputed from its value.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank id or name, a threshold
    /// that is not a finite `min <= max` range, or an id that is already
    /// registered.
    pub async fn register_sensor(&self, mut sensor: SensorRecord) -> Result<SensorRecord, EngineError> {
        require_non_blank("sensor id", &sensor.id)?;
        require_non_blank("sensor name", &sensor.name)?;
        sensor.threshold.validate()?;
        trim_history(&mut sensor, self.history_capacity);
        if sensor.status != SensorStatus::Offline {
            sensor.status = SensorStatus::Online.after_reading(!sensor.is_out_of_range());
        }

        let mut sensors = self.sensors.write().await;
        if sensors.iter().any(|s| s.id == sensor.id) {
            return Err(EngineError::validation(format!(
                "sensor '{}' is already registered",
                sensor.id
            )));
        }
        self.journal.record(
            JournalOp::Create,
            EntityKind::Sensor,
            &sensor.id,
            &sensor,
            Utc::now(),
        )
        .await?;
        sensors.push(sensor.clone());
        tracing::debug!(id = %sensor.id, kind = %sensor.kind, "sensor registered");
        Ok(sensor)
    }

    /// Apply a reading, then raise alerts and synthesize a case as needed.
    ///
    /// `timestamp` defaults to now. An offline sensor records the value but
    /// stays offline and raises nothing. Once the reading is committed, a
    /// failed range alert or synthesis is logged and the updated sensor is
    /// still returned.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown sensor,
    /// `CoreError::Validation` for a non-finite value, or
    /// `EngineError::Journal` if the reading's journal append fails.
    pub async fn ingest_reading(
        &self,
        sensor_id: &str,
        value: f64,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<SensorRecord, EngineError> {
        if !value.is_finite() {
            return Err(EngineError::validation(format!(
                "reading for '{sensor_id}' is not a finite number"
            )));
        }
        let reading = SensorReading {
            timestamp: timestamp.unwrap_or_else(Utc::now),
            value,
        };

        let updated = {
            let mut sensors = self.sensors.write().await;
            let sensor = sensors
                .iter_mut()
                .find(|s| s.id == sensor_id)
                .ok_or_else(|| EngineError::not_found("sensor", sensor_id))?;
            self.journal.record(
                JournalOp::Reading,
                EntityKind::Sensor,
                sensor_id,
                &reading,
                reading.timestamp,
            )
            .await?;
            apply_reading(sensor, reading, self.history_capacity);
            sensor.clone()
        };
        tracing::debug!(id = sensor_id, value, status = %updated.status, "reading ingested");

        if updated.status == SensorStatus::Warning {
            if let Err(e) = self.alerts.raise(range_alert(&updated)).await {
                tracing::error!(sensor = sensor_id, "range alert not raised: {e}");
            }
            if self.trigger.should_synthesize() {
                if let Err(e) = self.synthesize_case(&updated).await {
                    tracing::error!(sensor = sensor_id, "case synthesis failed: {e}");
                }
            }
        }
        Ok(updated)
    }

    /// Generate an IoT health case from an anomalous sensor, if its kind and
    /// value call for one, and announce it with its own alert.
    ///
    /// Synthesized records never raise the score-threshold alert. A failed
    /// case alert is logged; the stored record is still returned.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Journal` if the record's journal append fails.
    pub async fn synthesize_case(
        &self,
        sensor: &SensorRecord,
    ) -> Result<Option<HealthRecord>, EngineError> {
        let Some(profile) = profile_for(sensor) else {
            tracing::debug!(id = %sensor.id, kind = %sensor.kind, "no case profile for reading");
            return Ok(None);
        };

        let (record, case_number) = self
            .cases
            .insert_with(DataSource::Iot, |n| observation_for(sensor, profile, n))
            .await?;
        tracing::debug!(
            sensor = %sensor.id,
            record = %record.id,
            case_number,
            "synthesized IoT case"
        );
        if let Err(e) = self
            .alerts
            .raise(case_alert(sensor, profile, case_number))
            .await
        {
            tracing::error!(record = %record.id, case_number, "case alert not raised: {e}");
        }
        Ok(Some(record))
    }

    /// Sensors in registration order.
    pub async fn list_sensors(&self) -> Vec<SensorRecord> {
        self.sensors.read().await.clone()
    }

    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown id.
    pub async fn get(&self, sensor_id: &str) -> Result<SensorRecord, EngineError> {
        self.sensors
            .read()
            .await
            .iter()
            .find(|s| s.id == sensor_id)
            .cloned()
            .ok_or_else(|| EngineError::not_found("sensor", sensor_id))
    }

    pub async fn iot_metrics(&self) -> IotMetrics {
        fleet_metrics(&self.sensors.read().await)
    }
}

/// Record the reading and recompute status in one step.
fn apply_reading(sensor: &mut SensorRecord, reading: SensorReading, capacity: usize) {
    sensor.value = reading.value;
    sensor.last_reading_at = reading.timestamp;
    sensor.readings.push_back(reading);
    trim_history(sensor, capacity);
    sensor.status = sensor.status.after_reading(!sensor.is_out_of_range());
}

fn trim_history(sensor: &mut SensorRecord, capacity: usize) {
    while sensor.readings.len() > capacity {
        sensor.readings.pop_front();
    }
}

/// Status counts and uptime (share of sensors not offline, one decimal).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn fleet_metrics(sensors: &[SensorRecord]) -> IotMetrics {
    let count = |status| sensors.iter().filter(|s| s.status == status).count();
    let online_sensors = count(SensorStatus::Online);
    let offline_sensors = count(SensorStatus::Offline);
    let warnings = count(SensorStatus::Warning);

    let uptime = if sensors.is_empty() {
        0.0
    } else {
        let share = (sensors.len() - offline_sensors) as f64 / sensors.len() as f64 * 100.0;
        (share * 10.0).round() / 10.0
    };

    IotMetrics {
        online_sensors,
        offline_sensors,
        warnings,
        uptime,
    }
}
