use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::ContactSubmission,
    protocol::{RelayResponse, SubmissionPayload, SEND_MESSAGE_ROUTE},
};
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid relay url '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("relay request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("relay answered {status} with an unreadable body")]
    UnreadableResponse { status: u16 },
}

/// Carries a contact submission to the message relay.
#[async_trait]
pub trait RelayTransport: Send + Sync {
    async fn send(&self, submission: &ContactSubmission) -> Result<RelayResponse, TransportError>;
}

#[derive(Clone)]
pub struct HttpRelayClient {
    http: Client,
    endpoint: Url,
}

impl HttpRelayClient {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, TransportError> {
        let invalid = |source: url::ParseError| TransportError::InvalidUrl {
            url: base_url.to_string(),
            source,
        };
        let mut base = Url::parse(base_url).map_err(invalid)?;
        // The route is resolved relative to the base so a mount prefix survives.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base
            .join(SEND_MESSAGE_ROUTE.trim_start_matches('/'))
            .map_err(invalid)?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RelayTransport for HttpRelayClient {
    async fn send(&self, submission: &ContactSubmission) -> Result<RelayResponse, TransportError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&SubmissionPayload::from(submission))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;
        debug!(status, bytes = body.len(), "relay responded");
        serde_json::from_slice(&body).map_err(|_| TransportError::UnreadableResponse { status })
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
