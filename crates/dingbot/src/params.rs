use crate::config::DingbotConfig;
use crate::sign::{sign, timestamp_millis};

/// The `timestamp`/`sign` pair attached to signed requests.
#[derive(Clone, PartialEq, Eq)]
pub struct RequestSignature {
    /// Epoch milliseconds as a decimal string.
    pub timestamp: String,
    /// Base64 HMAC-SHA256 over the timestamp.
    pub sign: String,
}

/// Query parameters of one robot request.
///
/// The signature is either fully present or absent; there is no way to
/// carry a timestamp without its signature.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedRequestParameters {
    pub access_token: String,
    pub signature: Option<RequestSignature>,
}

impl std::fmt::Debug for SignedRequestParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedRequestParameters")
            .field("access_token", &"[REDACTED]")
            .field(
                "timestamp",
                &self.signature.as_ref().map(|s| s.timestamp.as_str()),
            )
            .field("signed", &self.signature.is_some())
            .finish()
    }
}

impl SignedRequestParameters {
    pub fn unsigned(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            signature: None,
        }
    }

    /// Sign with an explicit timestamp.
    pub fn signed(access_token: impl Into<String>, secret: &str, timestamp: String) -> Self {
        let sign = sign(secret, &timestamp);
        Self {
            access_token: access_token.into(),
            signature: Some(RequestSignature { timestamp, sign }),
        }
    }

    /// Parameters for a request sent now under `config`.
    pub fn for_config(config: &DingbotConfig) -> Self {
        match config.signing_secret() {
            Some(secret) => Self::signed(&config.access_token, secret, timestamp_millis()),
            None => Self::unsigned(&config.access_token),
        }
    }

    /// URL-encoded query string, without the leading `?`.
    pub fn to_query(&self) -> Result<String, serde_urlencoded::ser::Error> {
        let mut pairs = vec![("access_token", self.access_token.as_str())];
        if let Some(signature) = &self.signature {
            pairs.push(("timestamp", signature.timestamp.as_str()));
            pairs.push(("sign", signature.sign.as_str()));
        }
        serde_urlencoded::to_string(pairs)
    }

    /// Full request URL for `endpoint`.
    pub fn url(&self, endpoint: &str) -> Result<String, serde_urlencoded::ser::Error> {
        Ok(format!("{endpoint}?{}", self.to_query()?))
    }
}
