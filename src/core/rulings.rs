//! Card Rulings
//!
//! Official clarifications for L5R cards, fetched per card and never cached.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::cards::attachment::Attachment;

const RULING_COLOR: &str = "#363636";
const NO_LINK: &str = "No link available";

#[derive(Error, Debug)]
pub enum RulingsError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered, but not with 200.
    #[error("Rulings API returned status {status}")]
    Status { status: u16 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RulingsError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruling {
    pub source: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// A body without `records` is a decode error, not an empty list.
#[derive(Debug, Deserialize)]
struct RulingsEnvelope {
    records: Vec<Ruling>,
}

pub struct RulingsClient {
    client: Client,
    base_url: String,
}

impl RulingsClient {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::new(client, base_url))
    }

    /// Rulings for one card. An empty list means the card has none.
    pub async fn rulings(&self, card_id: &str) -> Result<Vec<Ruling>> {
        let url = format!("{}/cards/{}/rulings", self.base_url, card_id);
        log::debug!("Fetching rulings from {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(RulingsError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let envelope: RulingsEnvelope = serde_json::from_slice(&body)?;
        Ok(envelope.records)
    }
}

impl Ruling {
    pub fn to_attachment(&self) -> Attachment {
        let (title_link, footer) = match self.link.as_deref() {
            Some(link) if !link.is_empty() => (link.to_string(), String::new()),
            _ => (String::new(), NO_LINK.to_string()),
        };
        Attachment {
            fallback: "Rulings".to_string(),
            color: RULING_COLOR.to_string(),
            author_name: self.source.clone(),
            title: "Rulings".to_string(),
            title_link,
            text: self.text.clone().unwrap_or_default(),
            footer,
            mrkdwn_in: vec!["text".to_string()],
            ..Default::default()
        }
    }
}
