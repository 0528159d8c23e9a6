use reqwest::Client;
use tracing::warn;

use crate::config::REQUEST_TIMEOUT;
use crate::error::TransportError;

/// A fully built POST request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    /// Endpoint URL including the query string.
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

/// Status and full body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// The HTTP collaborator used by [`Webhook`](crate::Webhook).
///
/// Implementations issue exactly one POST per call, enforce their own
/// deadline, and return the whole body. They must be safe to share between
/// concurrent callers.
pub trait Transport: Send + Sync {
    fn post(
        &self,
        request: OutgoingRequest,
    ) -> impl std::future::Future<Output = Result<TransportResponse, TransportError>> + Send;
}

/// Default transport backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a client with the fixed [`REQUEST_TIMEOUT`].
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");
        Self { client }
    }

    /// Wrap an existing client, e.g. to share its connection pool.
    ///
    /// The caller is responsible for configuring its timeout.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn map_err(e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            warn!("robot request timed out");
            TransportError::Timeout(REQUEST_TIMEOUT)
        } else if e.is_connect() {
            TransportError::Connection(e.to_string())
        } else {
            TransportError::Http(e)
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for ReqwestTransport {
    async fn post(&self, request: OutgoingRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = self.client.post(&request.url).body(request.body);
        for (key, value) in &request.headers {
            builder = builder.header(*key, value);
        }

        let response = builder.send().await.map_err(Self::map_err)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(Self::map_err)?;

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}
