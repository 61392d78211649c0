use std::path::Path;

use anyhow::{Context, bail};
use chrono::Utc;
use serde::Serialize;

use hg_config::GuardConfig;
use hg_engine::fleet::default_fleet;
use hg_engine::{EngineOptions, HealthService};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct InitSummary {
    state_path: String,
    sensors: usize,
    journal_dir: Option<String>,
}

/// Handle `hgd init`.
pub async fn handle(
    args: &InitArgs,
    config: &GuardConfig,
    state_path: &Path,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if state_path.exists() && !args.force {
        bail!(
            "state file already exists at {}; pass --force to overwrite",
            state_path.display()
        );
    }

    let service = HealthService::new(
        EngineOptions::from_config(config).context("failed to configure engine")?,
    );
    for sensor in default_fleet(Utc::now()) {
        service.register_sensor(sensor).await?;
    }

    let state = service.snapshot().await;
    state
        .save(state_path)
        .with_context(|| format!("failed to write state file {}", state_path.display()))?;
    tracing::info!(path = %state_path.display(), sensors = state.sensors.len(), "state initialized");

    let summary = InitSummary {
        state_path: state_path.display().to_string(),
        sensors: state.sensors.len(),
        journal_dir: config
            .storage
            .journal_enabled
            .then(|| config.storage.journal_dir.clone()),
    };
    output(&summary, flags.format)
}
