use futures::FutureExt;
use futures::future::BoxFuture;

use super::{DeliveryError, DeliveryKind, NotificationSink};

/// Writes each delivery to the log instead of sending it anywhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn deliver<'a>(
        &'a self,
        kind: DeliveryKind,
        destination: &'a str,
        text: &'a str,
    ) -> BoxFuture<'a, Result<(), DeliveryError>> {
        tracing::info!(%kind, destination, "notification:\n{text}");
        futures::future::ready(Ok(())).boxed()
    }
}
