use std::fmt;

use serde::{Deserialize, Serialize};

/// The `msgtype` discriminator understood by the robot endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MsgType {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "link")]
    Link,
    #[serde(rename = "markdown")]
    Markdown,
    #[serde(rename = "actionCard")]
    ActionCard,
    #[serde(rename = "feedCard")]
    FeedCard,
}

impl MsgType {
    /// Returns the wire value of the discriminator.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Link => "link",
            Self::Markdown => "markdown",
            Self::ActionCard => "actionCard",
            Self::FeedCard => "feedCard",
        }
    }
}

impl fmt::Display for MsgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plain text payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    pub content: String,
}

/// A titled link with optional preview picture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub text: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pic_url: Option<String>,
    pub message_url: String,
}

impl Link {
    pub fn new(
        title: impl Into<String>,
        text: impl Into<String>,
        message_url: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            title: title.into(),
            pic_url: None,
            message_url: message_url.into(),
        }
    }

    /// Set the preview picture shown next to the link.
    #[must_use]
    pub fn with_picture(mut self, pic_url: impl Into<String>) -> Self {
        self.pic_url = Some(pic_url.into());
        self
    }
}

/// Markdown body. `title` is only used for the notification preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markdown {
    pub text: String,
    pub title: String,
}

/// Whether the sender avatar is shown on an action card.
///
/// Encoded on the wire as the strings `"0"` (show) and `"1"` (hide).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvatarVisibility {
    #[default]
    #[serde(rename = "0")]
    Show,
    #[serde(rename = "1")]
    Hide,
}

/// Layout of the independent buttons on an action card.
///
/// Encoded on the wire as the strings `"0"` (vertical) and `"1"` (horizontal).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonOrientation {
    #[default]
    #[serde(rename = "0")]
    Vertical,
    #[serde(rename = "1")]
    Horizontal,
}

/// One independent button on an action card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionButton {
    pub title: String,
    #[serde(rename = "actionURL")]
    pub action_url: String,
}

/// An action card, either with a single whole-card button
/// (`single_title`/`single_url`) or with a list of independent buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionCard {
    pub text: String,
    pub title: String,
    #[serde(default)]
    pub hide_avatar: AvatarVisibility,
    #[serde(default)]
    pub btn_orientation: ButtonOrientation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_title: Option<String>,
    #[serde(rename = "singleURL", default, skip_serializing_if = "Option::is_none")]
    pub single_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub btns: Vec<ActionButton>,
}

impl ActionCard {
    /// Create a card without buttons. Add them with [`with_button`](Self::with_button).
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            title: title.into(),
            hide_avatar: AvatarVisibility::Show,
            btn_orientation: ButtonOrientation::Vertical,
            single_title: None,
            single_url: None,
            btns: Vec::new(),
        }
    }

    /// Create a card whose whole body jumps to `single_url`.
    pub fn single(
        title: impl Into<String>,
        text: impl Into<String>,
        single_title: impl Into<String>,
        single_url: impl Into<String>,
    ) -> Self {
        let mut card = Self::new(title, text);
        card.single_title = Some(single_title.into());
        card.single_url = Some(single_url.into());
        card
    }

    /// Append an independent button.
    #[must_use]
    pub fn with_button(mut self, title: impl Into<String>, action_url: impl Into<String>) -> Self {
        self.btns.push(ActionButton {
            title: title.into(),
            action_url: action_url.into(),
        });
        self
    }

    #[must_use]
    pub fn with_hide_avatar(mut self, hide: bool) -> Self {
        self.hide_avatar = if hide {
            AvatarVisibility::Hide
        } else {
            AvatarVisibility::Show
        };
        self
    }

    #[must_use]
    pub fn with_horizontal_buttons(mut self, horizontal: bool) -> Self {
        self.btn_orientation = if horizontal {
            ButtonOrientation::Horizontal
        } else {
            ButtonOrientation::Vertical
        };
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedLink {
    pub title: String,
    pub pic_url: String,
    pub message_url: String,
}

impl FeedLink {
    pub fn new(
        title: impl Into<String>,
        message_url: impl Into<String>,
        pic_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            pic_url: pic_url.into(),
            message_url: message_url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedCard {
    pub links: Vec<FeedLink>,
}

/// Who gets `@`-mentioned in the group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mention {
    #[serde(default)]
    pub at_mobiles: Vec<String>,
    #[serde(default)]
    pub is_at_all: bool,
}

/// The payload of a message. Exactly one variant is present and the
/// `msgtype` tag always matches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "msgtype")]
pub enum MessageBody {
    #[serde(rename = "text")]
    Text { text: Text },
    #[serde(rename = "link")]
    Link { link: Link },
    #[serde(rename = "markdown")]
    Markdown { markdown: Markdown },
    #[serde(rename = "actionCard")]
    ActionCard {
        #[serde(rename = "actionCard")]
        action_card: ActionCard,
    },
    #[serde(rename = "feedCard")]
    FeedCard {
        #[serde(rename = "feedCard")]
        feed_card: FeedCard,
    },
}

impl MessageBody {
    pub fn msgtype(&self) -> MsgType {
        match self {
            Self::Text { .. } => MsgType::Text,
            Self::Link { .. } => MsgType::Link,
            Self::Markdown { .. } => MsgType::Markdown,
            Self::ActionCard { .. } => MsgType::ActionCard,
            Self::FeedCard { .. } => MsgType::FeedCard,
        }
    }
}

/// A robot message: one payload plus an optional mention directive.
///
/// Serializes to the JSON envelope the robot endpoint expects, e.g.
/// `{"msgtype":"text","text":{"content":"hi"},"at":{"atMobiles":[],"isAtAll":true}}`.
///
/// ```rust
/// use dingbot::Message;
///
/// let message = Message::text("deploy finished").at_mobiles(["13800000000"]);
/// assert_eq!(message.msgtype().as_str(), "text");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MessageEnvelope")]
pub struct Message {
    #[serde(flatten)]
    pub body: MessageBody,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<Mention>,
}

/// Decoding shape of [`Message`]: every payload key is optional here so
/// stray payloads can be detected instead of silently dropped.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageEnvelope {
    msgtype: MsgType,
    text: Option<Text>,
    link: Option<Link>,
    markdown: Option<Markdown>,
    action_card: Option<ActionCard>,
    feed_card: Option<FeedCard>,
    #[serde(default)]
    at: Option<Mention>,
}

impl TryFrom<MessageEnvelope> for Message {
    type Error = String;

    fn try_from(envelope: MessageEnvelope) -> Result<Self, Self::Error> {
        let MessageEnvelope {
            msgtype,
            text,
            link,
            markdown,
            action_card,
            feed_card,
            at,
        } = envelope;

        let present = [
            text.is_some(),
            link.is_some(),
            markdown.is_some(),
            action_card.is_some(),
            feed_card.is_some(),
        ]
        .into_iter()
        .filter(|p| *p)
        .count();
        if present > 1 {
            return Err(format!(
                "expected only the `{msgtype}` payload, found {present} payloads"
            ));
        }

        let body = match msgtype {
            MsgType::Text => text.map(|text| MessageBody::Text { text }),
            MsgType::Link => link.map(|link| MessageBody::Link { link }),
            MsgType::Markdown => markdown.map(|markdown| MessageBody::Markdown { markdown }),
            MsgType::ActionCard => {
                action_card.map(|action_card| MessageBody::ActionCard { action_card })
            }
            MsgType::FeedCard => feed_card.map(|feed_card| MessageBody::FeedCard { feed_card }),
        }
        .ok_or_else(|| format!("missing `{msgtype}` payload"))?;

        Ok(Self { body, at })
    }
}

impl Message {
    pub fn new(body: MessageBody) -> Self {
        Self { body, at: None }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Text {
            content: content.into(),
        }
        .into()
    }

    pub fn link(
        title: impl Into<String>,
        text: impl Into<String>,
        message_url: impl Into<String>,
    ) -> Self {
        Link::new(title, text, message_url).into()
    }

    pub fn markdown(title: impl Into<String>, text: impl Into<String>) -> Self {
        Markdown {
            text: text.into(),
            title: title.into(),
        }
        .into()
    }

    pub fn action_card(card: ActionCard) -> Self {
        card.into()
    }

    pub fn feed_card(links: impl IntoIterator<Item = FeedLink>) -> Self {
        FeedCard {
            links: links.into_iter().collect(),
        }
        .into()
    }

    pub fn msgtype(&self) -> MsgType {
        self.body.msgtype()
    }

    /// Mention group members by mobile number. Duplicates are dropped,
    /// first-seen order is kept.
    #[must_use]
    pub fn at_mobiles<I, S>(mut self, mobiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mention = self.at.get_or_insert_with(Mention::default);
        for mobile in mobiles {
            let mobile = mobile.into();
            if !mention.at_mobiles.contains(&mobile) {
                mention.at_mobiles.push(mobile);
            }
        }
        self
    }

    /// Mention everyone in the group.
    #[must_use]
    pub fn at_all(mut self) -> Self {
        self.at.get_or_insert_with(Mention::default).is_at_all = true;
        self
    }
}

impl From<MessageBody> for Message {
    fn from(body: MessageBody) -> Self {
        Self::new(body)
    }
}

impl From<Text> for Message {
    fn from(text: Text) -> Self {
        Self::new(MessageBody::Text { text })
    }
}

impl From<Link> for Message {
    fn from(link: Link) -> Self {
        Self::new(MessageBody::Link { link })
    }
}

impl From<Markdown> for Message {
    fn from(markdown: Markdown) -> Self {
        Self::new(MessageBody::Markdown { markdown })
    }
}

impl From<ActionCard> for Message {
    fn from(action_card: ActionCard) -> Self {
        Self::new(MessageBody::ActionCard { action_card })
    }
}

impl From<FeedCard> for Message {
    fn from(feed_card: FeedCard) -> Self {
        Self::new(MessageBody::FeedCard { feed_card })
    }
}
