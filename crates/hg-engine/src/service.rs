//! Service facade wiring the registries together.
//!
//! `HealthService` owns one instance of each registry, shared by `Arc`:
//! the case store and sensor monitor raise through the alert engine, and the
//! sensor monitor appends synthesized cases to the case store.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use hg_config::GuardConfig;
use hg_core::entities::{Alert, HealthRecord, HouseholdObservation, NewAlert, SensorRecord};
use hg_core::enums::AlertStatus;
use hg_core::responses::AnalyticsSnapshot;

use crate::alerts::AlertEngine;
use crate::cases::CaseStore;
use crate::error::EngineError;
use crate::journal::JournalWriter;
use crate::notify::{
    DispatchPolicy, DispatchSettings, Dispatcher, DrainReport, HttpGatewaySink, LogSink,
    NotificationSink,
};
use crate::sensors::SensorMonitor;
use crate::state::EngineState;
use crate::trigger::{SeededTrigger, SynthesisTrigger};

/// Default number of readings kept per sensor.
pub const DEFAULT_HISTORY_CAPACITY: usize = 7;

/// Collaborators and tunables injected into a [`HealthService`].
pub struct EngineOptions {
    pub sink: Arc<dyn NotificationSink>,
    pub policy: DispatchPolicy,
    pub dispatch: DispatchSettings,
    pub trigger: Arc<dyn SynthesisTrigger>,
    pub journal: JournalWriter,
    pub history_capacity: usize,
}

impl Default for EngineOptions {
    /// Log-only notifications, a 30% entropy-seeded trigger, no journal.
    fn default() -> Self {
        Self {
            sink: Arc::new(LogSink),
            policy: DispatchPolicy::default(),
            dispatch: DispatchSettings::default(),
            trigger: Arc::new(SeededTrigger::default()),
            journal: JournalWriter::disabled(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl EngineOptions {
    /// Options described by a loaded configuration.
    ///
    /// A configured gateway URL selects the HTTP sink; otherwise deliveries
    /// are logged.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Setup` if the HTTP client cannot be built, or
    /// `EngineError::Journal` if the journal directory cannot be created.
    pub fn from_config(config: &GuardConfig) -> Result<Self, EngineError> {
        let dispatch = DispatchSettings::from(&config.notify);
        let sink: Arc<dyn NotificationSink> = if config.notify.is_configured() {
            let gateway = HttpGatewaySink::new(config.notify.gateway_url.clone(), dispatch.timeout)
                .map_err(|e| EngineError::Setup(format!("notification gateway: {e}")))?;
            Arc::new(gateway)
        } else {
            Arc::new(LogSink)
        };

        let journal = if config.storage.journal_enabled {
            JournalWriter::new(PathBuf::from(&config.storage.journal_dir))?
        } else {
            JournalWriter::disabled()
        };

        Ok(Self {
            sink,
            policy: DispatchPolicy::default(),
            dispatch,
            trigger: Arc::new(SeededTrigger::new(
                config.monitor.synthesis_probability,
                config.monitor.synthesis_seed,
            )),
            journal,
            history_capacity: config.monitor.history_capacity,
        })
    }
}

/// The library entry point: every external operation goes through here.
pub struct HealthService {
    alerts: Arc<AlertEngine>,
    cases: Arc<CaseStore>,
    sensors: Arc<SensorMonitor>,
    dispatcher: Arc<Dispatcher>,
}

impl HealthService {
    /// An engine with empty registries.
    #[must_use]
    pub fn new(options: EngineOptions) -> Self {
        Self::from_snapshot(EngineState::default(), options)
    }

    /// An engine resuming from a persisted snapshot.
    #[must_use]
    pub fn from_snapshot(state: EngineState, options: EngineOptions) -> Self {
        let journal = Arc::new(options.journal);
        let dispatcher = Arc::new(Dispatcher::new(
            options.sink,
            options.policy,
            options.dispatch,
        ));
        let alerts = Arc::new(AlertEngine::new(
            state.alerts,
            Arc::clone(&dispatcher),
            Arc::clone(&journal),
        ));
        let cases = Arc::new(CaseStore::new(
            state.health_records,
            Arc::clone(&alerts),
            Arc::clone(&journal),
        ));
        let sensors = Arc::new(SensorMonitor::new(
            state.sensors,
            options.history_capacity,
            Arc::clone(&alerts),
            Arc::clone(&cases),
            options.trigger,
            journal,
        ));
        Self {
            alerts,
            cases,
            sensors,
            dispatcher,
        }
    }

    /// Current contents of every registry.
    pub async fn snapshot(&self) -> EngineState {
        EngineState {
            health_records: self.cases.list_records().await,
            sensors: self.sensors.list_sensors().await,
            alerts: self.alerts.list_all().await,
        }
    }

    /// # Errors
    ///
    /// See [`CaseStore::add_record`].
    pub async fn submit_household(
        &self,
        observation: HouseholdObservation,
    ) -> Result<HealthRecord, EngineError> {
        self.cases.add_record(observation).await
    }

    /// # Errors
    ///
    /// See [`SensorMonitor::ingest_reading`].
    pub async fn submit_sensor_reading(
        &self,
        sensor_id: &str,
        value: f64,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<SensorRecord, EngineError> {
        self.sensors.ingest_reading(sensor_id, value, timestamp).await
    }

    /// # Errors
    ///
    /// See [`SensorMonitor::register_sensor`].
    pub async fn register_sensor(&self, sensor: SensorRecord) -> Result<SensorRecord, EngineError> {
        self.sensors.register_sensor(sensor).await
    }

    /// # Errors
    ///
    /// See [`AlertEngine::raise`].
    pub async fn create_alert(&self, new_alert: NewAlert) -> Result<Alert, EngineError> {
        self.alerts.raise(new_alert).await
    }

    /// # Errors
    ///
    /// See [`AlertEngine::resolve`].
    pub async fn resolve_alert(&self, id: &str) -> Result<Alert, EngineError> {
        self.alerts.resolve(id).await
    }

    pub async fn list_alerts(&self, status: Option<AlertStatus>) -> Vec<Alert> {
        self.alerts.list(status).await
    }

    pub async fn list_sensors(&self) -> Vec<SensorRecord> {
        self.sensors.list_sensors().await
    }

    pub async fn list_records(&self) -> Vec<HealthRecord> {
        self.cases.list_records().await
    }

    /// Record analytics plus sensor fleet metrics, computed fresh.
    pub async fn get_analytics(&self) -> AnalyticsSnapshot {
        let mut snapshot = self.cases.analytics().await;
        snapshot.iot_metrics = self.sensors.iot_metrics().await;
        snapshot
    }

    /// Wait up to `max_wait` for in-flight notification deliveries.
    pub async fn drain_notifications(&self, max_wait: Duration) -> DrainReport {
        self.dispatcher.drain(max_wait).await
    }

    #[must_use]
    pub const fn alerts(&self) -> &Arc<AlertEngine> {
        &self.alerts
    }

    #[must_use]
    pub const fn cases(&self) -> &Arc<CaseStore> {
        &self.cases
    }

    #[must_use]
    pub const fn sensors(&self) -> &Arc<SensorMonitor> {
        &self.sensors
    }
}
