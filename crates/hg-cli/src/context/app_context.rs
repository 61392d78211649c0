use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use hg_config::GuardConfig;
use hg_engine::state::EngineState;
use hg_engine::{EngineOptions, HealthService};

/// Extra time granted to in-flight deliveries beyond the per-delivery timeout.
const DRAIN_GRACE: Duration = Duration::from_secs(2);

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: HealthService,
    pub config: GuardConfig,
    pub state_path: PathBuf,
}

impl AppContext {
    /// Restore the engine from the state file.
    pub fn open(config: GuardConfig, state_path: PathBuf) -> anyhow::Result<Self> {
        if !state_path.is_file() {
            anyhow::bail!(
                "no healthguard state at {}. Run 'hgd init' first.",
                state_path.display()
            );
        }
        let state = EngineState::load(&state_path)
            .with_context(|| format!("failed to load state file {}", state_path.display()))?;
        let options = EngineOptions::from_config(&config).context("failed to configure engine")?;
        tracing::debug!(
            path = %state_path.display(),
            records = state.health_records.len(),
            sensors = state.sensors.len(),
            alerts = state.alerts.len(),
            "state loaded"
        );

        Ok(Self {
            service: HealthService::from_snapshot(state, options),
            config,
            state_path,
        })
    }

    /// Write the current engine state back to the state file.
    pub async fn persist(&self) -> anyhow::Result<()> {
        self.service
            .snapshot()
            .await
            .save(&self.state_path)
            .with_context(|| format!("failed to write state file {}", self.state_path.display()))
    }

    /// Wait, bounded, for notifications queued by this invocation.
    pub async fn settle(&self) {
        let max_wait = Duration::from_secs(self.config.notify.timeout_secs) + DRAIN_GRACE;
        let report = self.service.drain_notifications(max_wait).await;
        if report.abandoned > 0 {
            tracing::warn!(
                completed = report.completed,
                abandoned = report.abandoned,
                "notification deliveries abandoned at exit"
            );
        } else if report.completed > 0 {
            tracing::debug!(completed = report.completed, "notifications delivered");
        }
    }
}
