//! Event delivery to the ingest endpoint.

use anyhow::{bail, Result};
use async_trait::async_trait;

use folio_core::event::TrackRequest;

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &TrackRequest) -> Result<()>;
}

/// POSTs events to `/api/analytics/track` (or wherever `endpoint` points).
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &TrackRequest) -> Result<()> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;
        if !response.status().is_success() {
            bail!("ingest responded {}", response.status());
        }
        Ok(())
    }
}

/// The delivery-failure policy, in one place: log at warn level and drop the
/// event. No retry, no queue, and nothing propagates to the embedding page.
pub fn absorb_delivery_error(context: &'static str, result: Result<()>) {
    if let Err(error) = result {
        tracing::warn!(context, error = %error, "analytics delivery failed; event dropped");
    }
}
