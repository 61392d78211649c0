//! State file and journal locations.

use serde::{Deserialize, Serialize};

fn default_state_path() -> String {
    String::from(".healthguard/state.json")
}

fn default_journal_dir() -> String {
    String::from(".healthguard/journal")
}

const fn default_journal_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_state_path")]
    pub state_path: String,

    /// Directory for per-day `YYYY-MM-DD.jsonl` journal files.
    #[serde(default = "default_journal_dir")]
    pub journal_dir: String,

    #[serde(default = "default_journal_enabled")]
    pub journal_enabled: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_path: default_state_path(),
            journal_dir: default_journal_dir(),
            journal_enabled: default_journal_enabled(),
        }
    }
}
