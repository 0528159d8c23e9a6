use serde::Deserialize;

use crate::config::DING_CODE_OK;
use crate::error::DeliveryError;

/// The JSON acknowledgement returned by the robot endpoint.
///
/// The endpoint answers HTTP 200 for logical failures too, so only
/// `errcode` decides the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteAck {
    pub errcode: i64,
    #[serde(default)]
    pub errmsg: String,
}

impl RemoteAck {
    /// Decode an acknowledgement from a raw response body.
    ///
    /// On failure the error keeps the body text for diagnosis.
    pub fn from_body(body: &[u8]) -> Result<Self, DeliveryError> {
        serde_json::from_slice(body).map_err(|e| DeliveryError::Format {
            context: "parse response",
            source: e.into(),
            body: Some(String::from_utf8_lossy(body).into_owned()),
        })
    }

    pub fn is_ok(&self) -> bool {
        self.errcode == DING_CODE_OK
    }

    /// Map the acknowledgement to the outcome of the send.
    pub fn into_result(self) -> Result<(), DeliveryError> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(DeliveryError::Rejected {
                code: self.errcode,
                message: self.errmsg,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_ack() {
        let ack = RemoteAck::from_body(br#"{"errcode":0,"errmsg":"ok"}"#).unwrap();
        assert!(ack.is_ok());
        assert!(ack.into_result().is_ok());
    }

    #[test]
    fn rejected_ack() {
        let ack =
            RemoteAck::from_body(br#"{"errcode":300001,"errmsg":"token is not exist"}"#).unwrap();
        let err = ack.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Error 300001: token is not exist");
    }

    #[test]
    fn negative_code_is_failure() {
        let ack = RemoteAck::from_body(br#"{"errcode":-1,"errmsg":"busy"}"#).unwrap();
        assert!(!ack.is_ok());
        assert_eq!(ack.into_result().unwrap_err().code(), Some(-1));
    }

    #[test]
    fn missing_errmsg_defaults_empty() {
        let ack = RemoteAck::from_body(br#"{"errcode":0}"#).unwrap();
        assert_eq!(ack.errmsg, "");
    }

    #[test]
    fn garbage_body_is_format_error() {
        let err = RemoteAck::from_body(b"502 Bad Gateway").unwrap_err();
        assert!(matches!(err, DeliveryError::Format { .. }));
        assert_eq!(err.body(), Some("502 Bad Gateway"));
    }

    #[test]
    fn missing_errcode_is_format_error() {
        let err = RemoteAck::from_body(br#"{"errmsg":"ok"}"#).unwrap_err();
        assert!(matches!(err, DeliveryError::Format { .. }));
    }
}
