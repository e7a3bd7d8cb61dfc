use serde::{Deserialize, Serialize};

/// Neutral color used when a card's faction has no palette entry.
pub const DEFAULT_COLOR: &str = "#3c3c3c";

/// Rich chat message body, in Slack's attachment layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fallback: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title_link: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<AttachmentField>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub footer: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mrkdwn_in: Vec<String>,
}

/// One name/value cell; `short` cells share a row with their neighbour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub value: String,
    pub short: bool,
}

impl AttachmentField {
    /// `None` for an empty value or the literal `None` placeholder.
    pub fn titled(title: impl Into<String>, value: impl Into<String>, short: bool) -> Option<Self> {
        Self::build(Some(title.into()), value.into(), short)
    }

    pub fn untitled(value: impl Into<String>, short: bool) -> Option<Self> {
        Self::build(None, value.into(), short)
    }

    fn build(title: Option<String>, value: String, short: bool) -> Option<Self> {
        if is_blank(&value) {
            return None;
        }
        Some(Self { title, value, short })
    }
}

/// Values that never make it into an attachment.
pub fn is_blank(value: &str) -> bool {
    value.is_empty() || value == "None"
}
