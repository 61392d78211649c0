use std::path::PathBuf;

use anyhow::Context;
use hg_config::GuardConfig;

use crate::cli::GlobalFlags;

/// Load `.env` from the working directory, then layered configuration.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<GuardConfig> {
    load_state_dotenv(flags)?;
    GuardConfig::load().map_err(anyhow::Error::from)
}

/// State file from `--state`, falling back to `storage.state_path`.
///
/// Relative paths resolve against the current directory.
pub fn resolve_state_path(flags: &GlobalFlags, config: &GuardConfig) -> anyhow::Result<PathBuf> {
    let raw = flags
        .state
        .clone()
        .unwrap_or_else(|| config.storage.state_path.clone());
    let path = PathBuf::from(raw);
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    Ok(cwd.join(path))
}

/// Prefer a `.env` next to the project directory that holds an explicit
/// `--state` file; otherwise search upward from the working directory.
fn load_state_dotenv(flags: &GlobalFlags) -> anyhow::Result<()> {
    if let Some(state) = &flags.state {
        let project_root = PathBuf::from(state)
            .parent()
            .and_then(std::path::Path::parent)
            .map(std::path::Path::to_path_buf);
        if let Some(root) = project_root {
            let env_path = root.join(".env");
            if env_path.is_file() {
                dotenvy::from_path(&env_path).with_context(|| {
                    format!("failed to load dotenv file at {}", env_path.display())
                })?;
                return Ok(());
            }
        }
    }

    dotenvy::dotenv().ok();
    Ok(())
}
