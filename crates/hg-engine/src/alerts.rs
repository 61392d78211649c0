//! Alert registry.
//!
//! `raise` and `resolve` hold the write lock across validation, journaling,
//! and commit. Notification dispatch happens after the lock is released and
//! is never awaited.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use hg_core::entities::{Alert, NewAlert};
use hg_core::enums::{AlertStatus, EntityKind, JournalOp};
use hg_core::errors::CoreError;
use hg_core::ids::{PREFIX_ALERT, generate_unique_id};

use crate::error::EngineError;
use crate::journal::JournalWriter;
use crate::notify::Dispatcher;

/// Journal payload for a resolve.
#[derive(Debug, Serialize)]
struct StatusChange {
    from: AlertStatus,
    to: AlertStatus,
    resolved_at: DateTime<Utc>,
}

pub struct AlertEngine {
    alerts: RwLock<Vec<Alert>>,
    dispatcher: Arc<Dispatcher>,
    journal: Arc<JournalWriter>,
}

impl AlertEngine {
    /// Build the registry around previously persisted alerts.
    #[must_use]
    pub fn new(alerts: Vec<Alert>, dispatcher: Arc<Dispatcher>, journal: Arc<JournalWriter>) -> Self {
        Self {
            alerts: RwLock::new(alerts),
            dispatcher,
            journal,
        }
    }

    /// Validate, store, and notify.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank title or message, or
    /// `EngineError::Journal` if the journal append fails. Either way the
    /// registry is unchanged and nothing is sent.
    pub async fn raise(&self, new_alert: NewAlert) -> Result<Alert, EngineError> {
        new_alert.validate()?;

        let alert = {
            let mut alerts = self.alerts.write().await;
            let now = Utc::now();
            let alert = Alert {
                id: generate_unique_id(PREFIX_ALERT, |id| alerts.iter().any(|a| a.id == id)),
                title: new_alert.title,
                message: new_alert.message,
                severity: new_alert.severity,
                location: new_alert.location,
                status: AlertStatus::Active,
                created_at: now,
                resolved_at: None,
                channels: new_alert.channels,
                source: new_alert.source,
            };
            self.journal
                .record(JournalOp::Create, EntityKind::Alert, &alert.id, &alert, now)
                .await?;
            alerts.push(alert.clone());
            alert
        };

        tracing::info!(
            id = %alert.id,
            severity = %alert.severity,
            source = %alert.source,
            location = %alert.location,
            "alert raised: {}",
            alert.title
        );
        let spawned = self.dispatcher.dispatch(&alert);
        if spawned > 0 {
            tracing::debug!(id = %alert.id, spawned, "notifications dispatched");
        }
        Ok(alert)
    }

    /// Mark an active alert resolved.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown id and
    /// `CoreError::InvalidTransition` if the alert is already resolved.
    pub async fn resolve(&self, id: &str) -> Result<Alert, EngineError> {
        let mut alerts = self.alerts.write().await;
        let alert = alerts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| EngineError::not_found("alert", id))?;

        if !alert.status.can_transition_to(AlertStatus::Resolved) {
            return Err(CoreError::InvalidTransition {
                entity_type: "alert".into(),
                id: id.to_string(),
                from: alert.status.to_string(),
                to: AlertStatus::Resolved.to_string(),
            }
            .into());
        }

        let now = Utc::now();
        let change = StatusChange {
            from: alert.status,
            to: AlertStatus::Resolved,
            resolved_at: now,
        };
        self.journal
            .record(JournalOp::Resolve, EntityKind::Alert, id, &change, now)
            .await?;

        alert.status = AlertStatus::Resolved;
        alert.resolved_at = Some(now);
        tracing::info!(id, "alert resolved");
        Ok(alert.clone())
    }

    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown id.
    pub async fn get(&self, id: &str) -> Result<Alert, EngineError> {
        self.alerts
            .read()
            .await
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| EngineError::not_found("alert", id))
    }

    /// Alerts in insertion order, optionally narrowed to one status.
    pub async fn list(&self, status: Option<AlertStatus>) -> Vec<Alert> {
        self.alerts
            .read()
            .await
            .iter()
            .filter(|a| status.is_none_or(|s| a.status == s))
            .cloned()
            .collect()
    }

    pub async fn list_all(&self) -> Vec<Alert> {
        self.list(None).await
    }

    pub async fn list_active(&self) -> Vec<Alert> {
        self.list(Some(AlertStatus::Active)).await
    }

    pub async fn list_resolved(&self) -> Vec<Alert> {
        self.list(Some(AlertStatus::Resolved)).await
    }

    pub async fn count(&self) -> usize {
        self.alerts.read().await.len()
    }
}
