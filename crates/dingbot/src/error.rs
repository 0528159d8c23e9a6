use std::time::Duration;

use thiserror::Error;

/// Boxed cause carried by [`DeliveryError::Format`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures of the transport collaborator.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request did not complete within the deadline.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// An HTTP-level error reported by reqwest.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The connection could not be established. Custom transports also use
    /// this for failures that have no reqwest error behind them.
    #[error("connection error: {0}")]
    Connection(String),
}

/// Errors returned by [`Webhook::send`](crate::Webhook::send).
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Local serialization failed, or the response was not a valid
    /// acknowledgement. `body` holds the raw response for the latter.
    #[error("{context}: {source}")]
    Format {
        context: &'static str,
        #[source]
        source: BoxError,
        body: Option<String>,
    },

    /// The request never got a complete response.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The endpoint answered with a non-zero `errcode`.
    #[error("Error {code}: {message}")]
    Rejected { code: i64, message: String },
}

impl DeliveryError {
    pub(crate) fn format(context: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Format {
            context,
            source: source.into(),
            body: None,
        }
    }

    /// The remote `errcode`, if the endpoint rejected the message.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Rejected { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// The raw response body of a response that failed to decode.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Format { body, .. } => body.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_display_has_no_prefix() {
        let err = DeliveryError::Rejected {
            code: 300_001,
            message: "token is not exist".into(),
        };
        assert_eq!(err.to_string(), "Error 300001: token is not exist");
        assert_eq!(err.code(), Some(300_001));
    }

    #[test]
    fn negative_code_display() {
        let err = DeliveryError::Rejected {
            code: -1,
            message: "system busy".into(),
        };
        assert_eq!(err.to_string(), "Error -1: system busy");
    }

    #[test]
    fn transport_display() {
        let err: DeliveryError = TransportError::Timeout(Duration::from_secs(5)).into();
        assert_eq!(err.to_string(), "transport error: request timed out after 5s");
        assert!(err.code().is_none());
    }

    #[test]
    fn format_keeps_source_and_body() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = DeliveryError::Format {
            context: "parse response",
            source: source.into(),
            body: Some("<html>".into()),
        };
        assert!(err.to_string().starts_with("parse response: "));
        assert_eq!(err.body(), Some("<html>"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
