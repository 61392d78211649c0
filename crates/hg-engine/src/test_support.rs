//! Shared builders for unit tests.

use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;

use chrono::Utc;
use hg_core::entities::{
    Alert, HealthRecord, HouseholdObservation, NewAlert, SensorRecord, Threshold,
};
use hg_core::enums::{
    AlertSource, AlertStatus, Channel, DataSource, SanitationAccess, SensorKind, SensorStatus,
    Severity, Symptom, WaterSource,
};

use crate::alerts::AlertEngine;
use crate::cases::CaseStore;
use crate::journal::JournalWriter;
use crate::notify::{DispatchPolicy, DispatchSettings, Dispatcher, MemorySink};
use crate::sensors::SensorMonitor;
use crate::trigger::FixedTrigger;

pub const TEST_HISTORY_CAPACITY: usize = 3;

pub fn sample_alert(channels: &[Channel]) -> Alert {
    Alert {
        id: "al-0000beef".into(),
        title: "Test alert".into(),
        message: "Something happened".into(),
        severity: Severity::High,
        location: "Jorhat".into(),
        status: AlertStatus::Active,
        created_at: Utc::now(),
        resolved_at: None,
        channels: channels.iter().copied().collect(),
        source: AlertSource::Manual,
    }
}

pub fn new_alert(title: &str, channels: &[Channel]) -> NewAlert {
    NewAlert {
        title: title.into(),
        message: "Details to follow".into(),
        severity: Severity::Medium,
        location: "Jorhat".into(),
        channels: channels.iter().copied().collect(),
        source: AlertSource::Manual,
    }
}

pub fn observation(
    symptoms: &[Symptom],
    water_source: WaterSource,
    sanitation_access: SanitationAccess,
) -> HouseholdObservation {
    HouseholdObservation {
        household_id: "HH-101".into(),
        location: "Borbari Village, Jorhat".into(),
        asha_worker: "Rina Das".into(),
        symptoms: symptoms.iter().copied().collect(),
        water_source,
        sanitation_access,
        notes: String::new(),
    }
}

pub fn record_with(symptoms: &[Symptom], water_source: WaterSource, risk_score: Option<u8>) -> HealthRecord {
    HealthRecord {
        id: hg_core::ids::generate_id(hg_core::ids::PREFIX_HEALTH_RECORD),
        household_id: "HH-200".into(),
        location: "Majuli".into(),
        asha_worker: "Priya Bora".into(),
        symptoms: symptoms.iter().copied().collect::<BTreeSet<_>>(),
        water_source,
        sanitation_access: SanitationAccess::Unknown,
        notes: String::new(),
        created_at: Utc::now(),
        risk_score,
        data_source: DataSource::Manual,
    }
}

/// An online sensor whose value sits in the middle of its range.
pub fn sensor(id: &str, kind: SensorKind, min: f64, max: f64) -> SensorRecord {
    SensorRecord {
        id: id.into(),
        name: format!("Sensor {id}"),
        kind,
        location: "Borbari Village, Jorhat".into(),
        status: SensorStatus::Online,
        value: (min + max) / 2.0,
        unit: "units".into(),
        threshold: Threshold { min, max },
        last_reading_at: Utc::now(),
        readings: VecDeque::new(),
    }
}

fn dispatcher(sink: Arc<MemorySink>) -> Arc<Dispatcher> {
    Arc::new(Dispatcher::new(
        sink,
        DispatchPolicy::default(),
        DispatchSettings::default(),
    ))
}

pub fn alert_engine_with_sink(sink: Arc<MemorySink>) -> Arc<AlertEngine> {
    Arc::new(AlertEngine::new(
        Vec::new(),
        dispatcher(sink),
        Arc::new(JournalWriter::disabled()),
    ))
}

pub fn alert_engine() -> (Arc<AlertEngine>, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    (alert_engine_with_sink(Arc::clone(&sink)), sink)
}

/// Alert engine whose journal directory is gone, so every `raise` fails.
/// Keep the returned directory alive for the test's duration.
pub fn unjournaled_alert_engine() -> (Arc<AlertEngine>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let journal_dir = dir.path().join("journal");
    let journal = JournalWriter::new(journal_dir.clone()).unwrap();
    std::fs::remove_dir_all(&journal_dir).unwrap();
    let engine = Arc::new(AlertEngine::new(
        Vec::new(),
        dispatcher(Arc::new(MemorySink::new())),
        Arc::new(journal),
    ));
    (engine, dir)
}

pub fn case_store() -> (CaseStore, Arc<AlertEngine>) {
    case_store_with(alert_engine().0)
}

pub fn case_store_with(alerts: Arc<AlertEngine>) -> (CaseStore, Arc<AlertEngine>) {
    let store = CaseStore::new(
        Vec::new(),
        Arc::clone(&alerts),
        Arc::new(JournalWriter::disabled()),
    );
    (store, alerts)
}

pub struct TestMonitor {
    pub monitor: SensorMonitor,
    pub cases: Arc<CaseStore>,
    pub alerts: Arc<AlertEngine>,
}

/// Monitor with an empty fleet and a trigger that always answers `fires`.
pub fn monitor(fires: bool) -> TestMonitor {
    monitor_with(fires, alert_engine().0)
}

pub fn monitor_with(fires: bool, alerts: Arc<AlertEngine>) -> TestMonitor {
    let journal = Arc::new(JournalWriter::disabled());
    let cases = Arc::new(CaseStore::new(
        Vec::new(),
        Arc::clone(&alerts),
        Arc::clone(&journal),
    ));
    let monitor = SensorMonitor::new(
        Vec::new(),
        TEST_HISTORY_CAPACITY,
        Arc::clone(&alerts),
        Arc::clone(&cases),
        Arc::new(FixedTrigger(fires)),
        journal,
    );
    TestMonitor {
        monitor,
        cases,
        alerts,
    }
}
