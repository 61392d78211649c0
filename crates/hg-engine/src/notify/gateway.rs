//! HTTP messaging gateway sink.

use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Serialize;

use super::{DeliveryError, DeliveryKind, NotificationSink};

/// Request body accepted by the gateway.
#[derive(Debug, Serialize)]
struct GatewayPayload<'a> {
    phone: &'a str,
    message: &'a str,
    #[serde(rename = "type")]
    kind: DeliveryKind,
}

/// POSTs each delivery as JSON to a messaging gateway endpoint.
pub struct HttpGatewaySink {
    http: reqwest::Client,
    url: String,
}

impl HttpGatewaySink {
    /// # Errors
    ///
    /// Returns `DeliveryError::Http` if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DeliveryError> {
        let http = reqwest::Client::builder()
            .user_agent("healthguard/0.1")
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn post(
        &self,
        kind: DeliveryKind,
        destination: &str,
        text: &str,
    ) -> Result<(), DeliveryError> {
        let payload = GatewayPayload {
            phone: destination,
            message: text,
            kind,
        };
        let resp = self.http.post(&self.url).json(&payload).send().await?;
        check_response(resp).await?;
        tracing::debug!(%kind, destination, "gateway accepted delivery");
        Ok(())
    }
}

impl NotificationSink for HttpGatewaySink {
    fn deliver<'a>(
        &'a self,
        kind: DeliveryKind,
        destination: &'a str,
        text: &'a str,
    ) -> BoxFuture<'a, Result<(), DeliveryError>> {
        self.post(kind, destination, text).boxed()
    }
}

/// Map a non-success response to [`DeliveryError::Gateway`] with its body.
async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, DeliveryError> {
    if !resp.status().is_success() {
        return Err(DeliveryError::Gateway {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}
