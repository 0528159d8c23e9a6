//! Client for DingTalk group robot webhooks.
//!
//! Builds one of the robot message shapes, optionally signs the request
//! with the robot secret, posts it to the
//! [robot endpoint](https://open.dingtalk.com/document/robots/custom-robot-access)
//! and maps the `errcode` acknowledgement to a result.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use dingbot::{Message, Webhook};
//!
//! # async fn run() -> Result<(), dingbot::DeliveryError> {
//! let webhook = Webhook::new("ACCESS_TOKEN").with_secret("SEC...");
//! webhook
//!     .send(&Message::markdown("Deploy", "#### prod deployed").at_all())
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod ack;
pub mod client;
pub mod config;
pub mod error;
pub mod params;
pub mod sign;
pub mod transport;
pub mod types;

pub use ack::RemoteAck;
pub use client::{Sender, Webhook};
pub use config::{DING_CODE_OK, DingbotConfig, REQUEST_TIMEOUT, WEBHOOK_URL};
pub use error::{DeliveryError, TransportError};
pub use params::{RequestSignature, SignedRequestParameters};
pub use sign::sign;
pub use transport::{OutgoingRequest, ReqwestTransport, Transport, TransportResponse};
pub use types::{
    ActionButton, ActionCard, AvatarVisibility, ButtonOrientation, FeedCard, FeedLink, Link,
    Markdown, Mention, Message, MessageBody, MsgType, Text,
};
