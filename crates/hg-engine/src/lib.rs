//! # hg-engine
//!
//! The HealthGuard risk-scoring and alerting engine.
//!
//! Three registries, each behind its own lock and injected into its
//! collaborators by `Arc`:
//!
//! - [`alerts::AlertEngine`] owns alerts and hands SMS/WhatsApp deliveries to
//!   the [`notify::Dispatcher`].
//! - [`cases::CaseStore`] owns household health records, scores them with
//!   [`scoring::score`], and raises threshold alerts.
//! - [`sensors::SensorMonitor`] owns sensors, ingests readings, raises range
//!   alerts, and synthesizes IoT cases when the [`trigger::SynthesisTrigger`]
//!   fires.
//!
//! [`service::HealthService`] wires them together and is the entry point for
//! hosts. Every mutation is journaled before it is committed
//! ([`journal::JournalWriter`]); the whole engine round-trips through
//! [`state::EngineState`].

pub mod alerts;
pub mod cases;
pub mod error;
pub mod fleet;
pub mod journal;
pub mod notify;
pub mod scoring;
pub mod sensors;
pub mod service;
pub mod state;
pub mod synthesis;
pub mod trigger;

#[cfg(test)]
mod test_support;

pub use error::EngineError;
pub use service::{EngineOptions, HealthService};
