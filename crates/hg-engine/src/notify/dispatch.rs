//! Channel routing and fire-and-forget delivery.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tokio::task::JoinSet;

use hg_config::NotifyConfig;
use hg_core::entities::Alert;
use hg_core::enums::Channel;

use super::template::render_alert_message;
use super::{DeliveryError, DeliveryKind, NotificationSink};

// ---------------------------------------------------------------------------
// DispatchPolicy
// ---------------------------------------------------------------------------

/// Which alert channels produce an outbound delivery, and of what kind.
///
/// Channels without a route (Email, Dashboard by default) are display-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchPolicy {
    routes: BTreeMap<Channel, DeliveryKind>,
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self {
            routes: BTreeMap::from([
                (Channel::Sms, DeliveryKind::Sms),
                (Channel::WhatsApp, DeliveryKind::WhatsApp),
            ]),
        }
    }
}

impl DispatchPolicy {
    /// A policy that routes nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            routes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_route(mut self, channel: Channel, kind: DeliveryKind) -> Self {
        self.routes.insert(channel, kind);
        self
    }

    #[must_use]
    pub fn route(&self, channel: Channel) -> Option<DeliveryKind> {
        self.routes.get(&channel).copied()
    }

    /// Distinct delivery kinds for a channel set.
    #[must_use]
    pub fn deliveries_for(&self, channels: &BTreeSet<Channel>) -> BTreeSet<DeliveryKind> {
        channels.iter().filter_map(|c| self.route(*c)).collect()
    }
}

// ---------------------------------------------------------------------------
// DispatchSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSettings {
    /// Phone number every delivery goes to.
    pub destination: String,
    /// Sign-off line of the rendered message.
    pub signature: String,
    /// Upper bound on a single delivery.
    pub timeout: Duration,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self::from(&NotifyConfig::default())
    }
}

impl From<&NotifyConfig> for DispatchSettings {
    fn from(config: &NotifyConfig) -> Self {
        Self {
            destination: config.phone.clone(),
            signature: config.signature.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Outcome of [`Dispatcher::drain`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DrainReport {
    /// Deliveries that finished (successfully or not) within the wait.
    pub completed: usize,
    /// Deliveries still running when the wait ran out; they were aborted.
    pub abandoned: usize,
}

/// Spawns one delivery task per routed channel of an alert.
///
/// Tasks are tracked so a short-lived host can [`drain`](Self::drain) them
/// before exiting. Failures and timeouts are logged at `warn` and go no
/// further.
pub struct Dispatcher {
    sink: Arc<dyn NotificationSink>,
    policy: DispatchPolicy,
    settings: DispatchSettings,
    tasks: Mutex<JoinSet<()>>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(
        sink: Arc<dyn NotificationSink>,
        policy: DispatchPolicy,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            sink,
            policy,
            settings,
            tasks: Mutex::new(JoinSet::new()),
        }
    }

    #[must_use]
    pub const fn policy(&self) -> &DispatchPolicy {
        &self.policy
    }

    #[must_use]
    pub const fn settings(&self) -> &DispatchSettings {
        &self.settings
    }

    /// Spawn deliveries for `alert` and return how many were started.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&self, alert: &Alert) -> usize {
        let kinds = self.policy.deliveries_for(&alert.channels);
        if kinds.is_empty() {
            return 0;
        }

        let text: Arc<str> =
            render_alert_message(alert, &self.settings.signature, Utc::now()).into();
        let mut tasks = self.lock_tasks();
        while tasks.try_join_next().is_some() {}

        for kind in &kinds {
            let kind = *kind;
            let sink = Arc::clone(&self.sink);
            let destination = self.settings.destination.clone();
            let text = Arc::clone(&text);
            let timeout = self.settings.timeout;
            let alert_id = alert.id.clone();

            tasks.spawn(async move {
                let outcome = tokio::time::timeout(timeout, sink.deliver(kind, &destination, &text))
                    .await
                    .unwrap_or_else(|_| Err(DeliveryError::Timeout(timeout)));
                match outcome {
                    Ok(()) => tracing::debug!(alert_id = %alert_id, %kind, "notification delivered"),
                    Err(error) => {
                        tracing::warn!(alert_id = %alert_id, %kind, %error, "notification delivery failed");
                    }
                }
            });
        }
        kinds.len()
    }

    /// Deliveries spawned but not yet reaped.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.lock_tasks().len()
    }

    /// Wait up to `max_wait` for every spawned delivery, aborting stragglers.
    pub async fn drain(&self, max_wait: Duration) -> DrainReport {
        let mut tasks = std::mem::take(&mut *self.lock_tasks());
        let mut completed = 0;

        let _ = tokio::time::timeout(max_wait, async {
            while let Some(joined) = tasks.join_next().await {
                if let Err(error) = joined {
                    tracing::warn!(%error, "notification task did not finish cleanly");
                }
                completed += 1;
            }
        })
        .await;

        let abandoned = tasks.len();
        if abandoned > 0 {
            tracing::warn!(abandoned, "abandoning undelivered notifications");
            tasks.abort_all();
        }
        DrainReport {
            completed,
            abandoned,
        }
    }

    fn lock_tasks(&self) -> MutexGuard<'_, JoinSet<()>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MemorySink;
    use crate::test_support::sample_alert;
    use futures::FutureExt;
    use futures::future::BoxFuture;
    use pretty_assertions::assert_eq;

    fn dispatcher(sink: Arc<dyn NotificationSink>) -> Dispatcher {
        Dispatcher::new(sink, DispatchPolicy::default(), DispatchSettings::default())
    }

    /// Never completes within any reasonable timeout.
    struct StuckSink;

    impl NotificationSink for StuckSink {
        fn deliver<'a>(
            &'a self,
            _kind: DeliveryKind,
            _destination: &'a str,
            _text: &'a str,
        ) -> BoxFuture<'a, Result<(), DeliveryError>> {
            tokio::time::sleep(Duration::from_secs(3600))
                .map(|()| Ok(()))
                .boxed()
        }
    }

    #[test]
    fn default_policy_routes_sms_and_whatsapp_only() {
        let policy = DispatchPolicy::default();
        assert_eq!(policy.route(Channel::Sms), Some(DeliveryKind::Sms));
        assert_eq!(policy.route(Channel::WhatsApp), Some(DeliveryKind::WhatsApp));
        assert_eq!(policy.route(Channel::Email), None);
        assert_eq!(policy.route(Channel::Dashboard), None);
    }

    #[test]
    fn custom_policy_can_route_email() {
        let policy = DispatchPolicy::empty().with_route(Channel::Email, DeliveryKind::Sms);
        let kinds = policy.deliveries_for(&BTreeSet::from([Channel::Email, Channel::Sms]));
        assert_eq!(kinds, BTreeSet::from([DeliveryKind::Sms]));
    }

    #[tokio::test]
    async fn one_delivery_per_routed_channel() {
        let sink = Arc::new(MemorySink::new());
        let dispatcher = dispatcher(sink.clone());
        let alert = sample_alert(&[Channel::Sms, Channel::WhatsApp, Channel::Dashboard]);

        assert_eq!(dispatcher.dispatch(&alert), 2);
        let report = dispatcher.drain(Duration::from_secs(5)).await;

        assert_eq!(report, DrainReport { completed: 2, abandoned: 0 });
        let mut kinds: Vec<_> = sink.deliveries().iter().map(|d| d.kind).collect();
        kinds.sort();
        assert_eq!(kinds, vec![DeliveryKind::Sms, DeliveryKind::WhatsApp]);
        assert!(sink.deliveries().iter().all(|d| d.destination == "9392995909"));
        assert!(sink.deliveries()[0].text.starts_with("🚨 HEALTH ALERT 🚨\n\n"));
    }

    #[tokio::test]
    async fn dashboard_and_email_send_nothing() {
        let sink = Arc::new(MemorySink::new());
        let dispatcher = dispatcher(sink.clone());
        let alert = sample_alert(&[Channel::Email, Channel::Dashboard]);

        assert_eq!(dispatcher.dispatch(&alert), 0);
        assert_eq!(dispatcher.pending(), 0);
        assert!(sink.deliveries().is_empty());
    }

    #[tokio::test]
    async fn failed_deliveries_are_swallowed() {
        let sink = Arc::new(MemorySink::failing());
        let dispatcher = dispatcher(sink.clone());

        dispatcher.dispatch(&sample_alert(&[Channel::Sms]));
        let report = dispatcher.drain(Duration::from_secs(5)).await;

        assert_eq!(report.completed, 1);
        assert!(sink.deliveries().is_empty());
    }

    #[tokio::test]
    async fn slow_delivery_times_out() {
        let settings = DispatchSettings {
            timeout: Duration::from_millis(20),
            ..DispatchSettings::default()
        };
        let dispatcher = Dispatcher::new(Arc::new(StuckSink), DispatchPolicy::default(), settings);

        dispatcher.dispatch(&sample_alert(&[Channel::WhatsApp]));
        let report = dispatcher.drain(Duration::from_secs(5)).await;

        assert_eq!(report, DrainReport { completed: 1, abandoned: 0 });
    }

    #[tokio::test]
    async fn drain_abandons_deliveries_past_the_wait() {
        let settings = DispatchSettings {
            timeout: Duration::from_secs(3600),
            ..DispatchSettings::default()
        };
        let dispatcher = Dispatcher::new(Arc::new(StuckSink), DispatchPolicy::default(), settings);

        dispatcher.dispatch(&sample_alert(&[Channel::Sms]));
        let report = dispatcher.drain(Duration::from_millis(20)).await;

        assert_eq!(report, DrainReport { completed: 0, abandoned: 1 });
        assert_eq!(dispatcher.pending(), 0);
    }
}
