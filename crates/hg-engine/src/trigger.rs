//! Decides whether an out-of-range reading synthesizes a health case.

use std::sync::{Mutex, PoisonError};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Default share of out-of-range readings that synthesize a case.
pub const DEFAULT_SYNTHESIS_PROBABILITY: f64 = 0.3;

pub trait SynthesisTrigger: Send + Sync {
    fn should_synthesize(&self) -> bool;
}

/// Bernoulli draw from a `ChaCha20Rng`.
///
/// With a seed the sequence of decisions is reproducible.
pub struct SeededTrigger {
    probability: f64,
    rng: Mutex<ChaCha20Rng>,
}

impl SeededTrigger {
    /// `probability` is clamped to `[0, 1]`; `None` seeds from OS entropy.
    #[must_use]
    pub fn new(probability: f64, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(ChaCha20Rng::from_entropy, ChaCha20Rng::seed_from_u64);
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self {
            probability,
            rng: Mutex::new(rng),
        }
    }

    #[must_use]
    pub const fn probability(&self) -> f64 {
        self.probability
    }
}

impl Default for SeededTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_SYNTHESIS_PROBABILITY, None)
    }
}

impl SynthesisTrigger for SeededTrigger {
    fn should_synthesize(&self) -> bool {
        let fired = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen_bool(self.probability);
        tracing::debug!(fired, probability = self.probability, "synthesis draw");
        fired
    }
}

/// Always gives the same answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedTrigger(pub bool);

impl SynthesisTrigger for FixedTrigger {
    fn should_synthesize(&self) -> bool {
        self.0
    }
}
