use std::time::Duration;

use serde::Deserialize;

/// Robot webhook endpoint.
pub const WEBHOOK_URL: &str = "https://oapi.dingtalk.com/robot/send";

/// `errcode` value the endpoint returns on success.
pub const DING_CODE_OK: i64 = 0;

/// Deadline for one request, covering connect, send and response read.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for a single group robot.
///
/// Can be built in code or deserialized from a host application's config
/// file:
///
/// ```toml
/// access_token = "0123abcd"
/// secret = "SEC0123abcd"
/// ```
#[derive(Clone, Deserialize)]
pub struct DingbotConfig {
    /// Robot access token, sent as the `access_token` query parameter.
    pub access_token: String,

    /// Signing secret. When set, every request carries `timestamp` and
    /// `sign` query parameters.
    #[serde(default)]
    pub secret: Option<String>,

    /// Endpoint URL, without query string.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_endpoint() -> String {
    WEBHOOK_URL.to_owned()
}

impl std::fmt::Debug for DingbotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DingbotConfig")
            .field("access_token", &"[REDACTED]")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl DingbotConfig {
    /// Create an unsigned configuration for the given access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            secret: None,
            endpoint: default_endpoint(),
        }
    }

    /// Set the signing secret. An empty secret disables signing.
    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        let secret = secret.into();
        self.secret = (!secret.is_empty()).then_some(secret);
        self
    }

    /// Override the endpoint URL.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// The secret to sign with, if signing is enabled.
    pub fn signing_secret(&self) -> Option<&str> {
        self.secret.as_deref().filter(|s| !s.is_empty())
    }
}
