//! Sensor monitoring configuration.

use serde::{Deserialize, Serialize};

const fn default_history_capacity() -> usize {
    7
}

const fn default_synthesis_probability() -> f64 {
    0.3
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonitorConfig {
    /// Readings kept per sensor; the oldest is dropped when full.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Chance that an out-of-range reading synthesizes a health case.
    #[serde(default = "default_synthesis_probability")]
    pub synthesis_probability: f64,

    /// Fixed seed for the synthesis draw. Unset means seeded from entropy.
    #[serde(default)]
    pub synthesis_seed: Option<u64>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            synthesis_probability: default_synthesis_probability(),
            synthesis_seed: None,
        }
    }
}
