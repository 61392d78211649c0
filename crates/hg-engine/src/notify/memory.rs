use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use futures::FutureExt;
use futures::future::BoxFuture;

use super::{DeliveryError, DeliveryKind, NotificationSink};

/// A delivery captured by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub kind: DeliveryKind,
    pub destination: String,
    pub text: String,
}

/// Keeps every successful delivery in memory.
///
/// While failing, every delivery is rejected and nothing is recorded.
#[derive(Debug, Default)]
pub struct MemorySink {
    deliveries: Mutex<Vec<Delivery>>,
    failing: AtomicBool,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that rejects everything until [`Self::set_failing`] turns it off.
    #[must_use]
    pub fn failing() -> Self {
        let sink = Self::default();
        sink.set_failing(true);
        sink
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of the deliveries recorded so far, oldest first.
    #[must_use]
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl NotificationSink for MemorySink {
    fn deliver<'a>(
        &'a self,
        kind: DeliveryKind,
        destination: &'a str,
        text: &'a str,
    ) -> BoxFuture<'a, Result<(), DeliveryError>> {
        let result = if self.failing.load(Ordering::SeqCst) {
            Err(DeliveryError::Rejected(format!("{kind} to {destination}")))
        } else {
            self.deliveries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(Delivery {
                    kind,
                    destination: destination.to_string(),
                    text: text.to_string(),
                });
            Ok(())
        };
        futures::future::ready(result).boxed()
    }
}
