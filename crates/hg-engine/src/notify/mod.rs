//! Outbound alert notifications.
//!
//! The alert engine never awaits a delivery: [`Dispatcher`] spawns one task
//! per SMS/WhatsApp channel and logs whatever the [`NotificationSink`]
//! reports. Sinks:
//!
//! - [`LogSink`]: writes the message to the tracing log (default).
//! - [`HttpGatewaySink`]: POSTs `{phone, message, type}` to a messaging gateway.
//! - [`MemorySink`]: records deliveries in memory; can be told to fail.

mod dispatch;
mod gateway;
mod log;
mod memory;
pub mod template;

pub use dispatch::{DispatchPolicy, DispatchSettings, Dispatcher, DrainReport};
pub use gateway::HttpGatewaySink;
pub use log::LogSink;
pub use memory::{Delivery, MemorySink};

use std::fmt;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Transport a rendered alert is delivered over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryKind {
    Sms,
    WhatsApp,
}

impl DeliveryKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sms => "sms",
            Self::WhatsApp => "whatsapp",
        }
    }
}

impl fmt::Display for DeliveryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a delivery did not go through. Logged by the dispatcher, never
/// returned to the caller that raised the alert.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gateway answered with a non-success status.
    #[error("Gateway error ({status}): {message}")]
    Gateway { status: u16, message: String },

    #[error("Delivery timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The sink refused the message.
    #[error("Delivery rejected: {0}")]
    Rejected(String),
}

/// Something that can deliver a rendered alert message.
pub trait NotificationSink: Send + Sync {
    fn deliver<'a>(
        &'a self,
        kind: DeliveryKind,
        destination: &'a str,
        text: &'a str,
    ) -> BoxFuture<'a, Result<(), DeliveryError>>;
}
