use tracing::{debug, instrument};

use crate::ack::RemoteAck;
use crate::config::DingbotConfig;
use crate::error::DeliveryError;
use crate::params::SignedRequestParameters;
use crate::transport::{OutgoingRequest, ReqwestTransport, Transport};
use crate::types::Message;

const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

/// Anything that can deliver a [`Message`] to a group.
pub trait Sender: Send + Sync {
    /// Deliver one message. Implementations do not retry.
    fn send(
        &self,
        message: &Message,
    ) -> impl std::future::Future<Output = Result<(), DeliveryError>> + Send;
}

/// Client for one group robot webhook.
///
/// Holds only read-only configuration, so a single instance can serve any
/// number of concurrent [`send`](Self::send) calls.
#[derive(Debug, Clone)]
pub struct Webhook<T = ReqwestTransport> {
    config: DingbotConfig,
    transport: T,
}

impl Webhook<ReqwestTransport> {
    /// Create an unsigned client for the given access token, using the
    /// default transport with its 5-second deadline.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::from_config(DingbotConfig::new(access_token))
    }

    pub fn from_config(config: DingbotConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: Transport> Webhook<T> {
    /// Create a client with a custom transport.
    pub fn with_transport(config: DingbotConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Sign every request with `secret`. An empty secret disables signing.
    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.config = self.config.with_secret(secret);
        self
    }

    pub fn config(&self) -> &DingbotConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Serialize the message and attach the query parameters for a request
    /// sent now.
    fn build_request(&self, message: &Message) -> Result<OutgoingRequest, DeliveryError> {
        let body = serde_json::to_vec(message)
            .map_err(|e| DeliveryError::format("serialize message", e))?;
        let url = SignedRequestParameters::for_config(&self.config)
            .url(&self.config.endpoint)
            .map_err(|e| DeliveryError::format("encode query", e))?;

        Ok(OutgoingRequest {
            url,
            headers: vec![("Content-Type", CONTENT_TYPE_JSON.to_owned())],
            body,
        })
    }

    /// Send a message.
    ///
    /// Issues exactly one POST and never retries. Success is decided by the
    /// `errcode` in the response body; the HTTP status is not inspected.
    #[instrument(
        skip_all,
        fields(msgtype = %message.msgtype(), signed = self.config.signing_secret().is_some())
    )]
    pub async fn send(&self, message: &Message) -> Result<(), DeliveryError> {
        let request = self.build_request(message)?;
        debug!(
            endpoint = %self.config.endpoint,
            bytes = request.body.len(),
            "sending robot message"
        );

        let response = self.transport.post(request).await?;
        debug!(status = response.status, "robot endpoint responded");

        let ack = RemoteAck::from_body(&response.body)?;
        debug!(errcode = ack.errcode, "decoded acknowledgement");
        ack.into_result()
    }
}

impl<T: Transport> Sender for Webhook<T> {
    async fn send(&self, message: &Message) -> Result<(), DeliveryError> {
        Webhook::send(self, message).await
    }
}
