//! Household health-record registry and aggregate analytics.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use hg_core::entities::{HealthRecord, HouseholdObservation, NewAlert};
use hg_core::enums::{
    AlertSource, Channel, DataSource, EntityKind, JournalOp, RiskBand, Severity, Symptom,
    WaterSource,
};
use hg_core::ids::{PREFIX_HEALTH_RECORD, generate_unique_id};
use hg_core::responses::{
    AnalyticsSnapshot, IotMetrics, RiskDistribution, SymptomCount, WaterSourceCount,
};

use crate::alerts::AlertEngine;
use crate::error::EngineError;
use crate::journal::JournalWriter;
use crate::scoring::{ALERT_THRESHOLD, CRITICAL_THRESHOLD, score_observation};

/// Number of entries in [`AnalyticsSnapshot::common_symptoms`].
pub const TOP_SYMPTOMS: usize = 5;

pub struct CaseStore {
    records: RwLock<Vec<HealthRecord>>,
    alerts: Arc<AlertEngine>,
    journal: Arc<JournalWriter>,
}

impl CaseStore {
    #[must_use]
    pub fn new(
        records: Vec<HealthRecord>,
        alerts: Arc<AlertEngine>,
        journal: Arc<JournalWriter>,
    ) -> Self {
        Self {
            records: RwLock::new(records),
            alerts,
            journal,
        }
    }

    /// Score and store a manual household submission.
    ///
    /// A score of 70 or more raises exactly one alert, after the record is
    /// committed. A failed alert is logged; the stored record is still
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for missing household id, location,
    /// or agent, and `EngineError::Journal` if the record's journal append
    /// fails.
    pub async fn add_record(
        &self,
        observation: HouseholdObservation,
    ) -> Result<HealthRecord, EngineError> {
        observation.validate()?;
        let (record, case_number) = self
            .insert_with(DataSource::Manual, |_| observation)
            .await?;

        if let Some(score) = record.risk_score.filter(|s| *s >= ALERT_THRESHOLD) {
            let raised = self
                .alerts
                .raise(threshold_alert(&record.location, score, case_number))
                .await;
            if let Err(e) = raised {
                tracing::error!(record = %record.id, case_number, "threshold alert not raised: {e}");
            }
        }
        Ok(record)
    }

    /// Store a record built from its 1-based case number, without any
    /// threshold alert. Used for IoT case synthesis, whose notes cite the
    /// case number.
    pub(crate) async fn insert_with(
        &self,
        data_source: DataSource,
        build: impl FnOnce(usize) -> HouseholdObservation,
    ) -> Result<(HealthRecord, usize), EngineError> {
        let mut records = self.records.write().await;
        let case_number = records.len() + 1;
        let observation = build(case_number);
        let now = Utc::now();

        let record = HealthRecord {
            id: generate_unique_id(PREFIX_HEALTH_RECORD, |id| records.iter().any(|r| r.id == id)),
            risk_score: Some(score_observation(&observation)),
            household_id: observation.household_id,
            location: observation.location,
            asha_worker: observation.asha_worker,
            symptoms: observation.symptoms,
            water_source: observation.water_source,
            sanitation_access: observation.sanitation_access,
            notes: observation.notes,
            created_at: now,
            data_source,
        };

        self.journal.record(
            JournalOp::Create,
            EntityKind::HealthRecord,
            &record.id,
            &record,
            now,
        )
        .await?;
        records.push(record.clone());
        tracing::info!(
            id = %record.id,
            case_number,
            score = record.risk_score.unwrap_or_default(),
            source = %data_source,
            "health record added"
        );
        Ok((record, case_number))
    }

    /// Records in insertion order.
    pub async fn list_records(&self) -> Vec<HealthRecord> {
        self.records.read().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }

    /// Aggregates over every stored record. IoT metrics are left at their
    /// defaults; the sensor monitor fills them in.
    pub async fn analytics(&self) -> AnalyticsSnapshot {
        summarize(&self.records.read().await)
    }
}

/// Alert raised for a record at or above the alert threshold.
fn threshold_alert(location: &str, score: u8, case_number: usize) -> NewAlert {
    NewAlert {
        title: format!("High Risk Health Alert - Case {case_number}"),
        message: format!("Multiple symptoms reported in {location}. Immediate attention required."),
        severity: if score >= CRITICAL_THRESHOLD {
            Severity::Critical
        } else {
            Severity::High
        },
        location: location.to_string(),
        channels: BTreeSet::from([Channel::Sms, Channel::WhatsApp, Channel::Dashboard]),
        source: AlertSource::System,
    }
}

/// Risk distribution, top symptoms, and water-source distribution.
///
/// Symptom ties are ordered by vocabulary order; water-source ties keep the
/// order in which each source first appears.
#[must_use]
pub fn summarize(records: &[HealthRecord]) -> AnalyticsSnapshot {
    let mut risk_distribution = RiskDistribution::default();
    let mut symptom_counts = [0_usize; Symptom::ALL.len()];
    let mut water_counts: Vec<(WaterSource, usize)> = Vec::new();

    for record in records {
        match record.risk_band() {
            RiskBand::Low => risk_distribution.low += 1,
            RiskBand::Medium => risk_distribution.medium += 1,
            RiskBand::High => risk_distribution.high += 1,
            RiskBand::Critical => risk_distribution.critical += 1,
        }
        for symptom in &record.symptoms {
            if let Some(slot) = Symptom::ALL.iter().position(|s| s == symptom) {
                symptom_counts[slot] += 1;
            }
        }
        match water_counts.iter_mut().find(|(s, _)| *s == record.water_source) {
            Some((_, count)) => *count += 1,
            None => water_counts.push((record.water_source, 1)),
        }
    }

    let mut common_symptoms: Vec<SymptomCount> = Symptom::ALL
        .into_iter()
        .zip(symptom_counts)
        .filter(|(_, count)| *count > 0)
        .map(|(name, count)| SymptomCount { name, count })
        .collect();
    common_symptoms.sort_by(|a, b| b.count.cmp(&a.count));
    common_symptoms.truncate(TOP_SYMPTOMS);

    water_counts.sort_by(|a, b| b.1.cmp(&a.1));
    let water_source_distribution = water_counts
        .into_iter()
        .map(|(source, count)| WaterSourceCount { source, count })
        .collect();

    AnalyticsSnapshot {
        total_records: records.len(),
        risk_distribution,
        common_symptoms,
        water_source_distribution,
        iot_metrics: IotMetrics::default(),
    }
}
