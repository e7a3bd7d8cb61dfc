//! Slack Web API Transport
//!
//! Polls `conversations.history` for each watched channel and answers with
//! `chat.postMessage`. Each channel keeps an `oldest` cursor so a message is
//! delivered once; the bot's own posts are skipped. History is read page by
//! page until Slack reports no more, and cursors only advance once every
//! channel has been read.

use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::transport::{ChatTransport, IncomingMessage, Reply, Result, TransportError};
use crate::config::SlackConfig;
use crate::core::cards::Attachment;

const HISTORY_PAGE_SIZE: &str = "100";

pub struct SlackTransport {
    client: Client,
    api_base_url: String,
    token: String,
    channels: Vec<String>,
    cursors: HashMap<String, String>,
    user_id: Option<String>,
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct AuthTest {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct History {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    messages: Vec<SlackMessage>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    response_metadata: Option<ResponseMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseMetadata {
    #[serde(default)]
    next_cursor: String,
}

impl History {
    /// Cursor for the following page, if there is one.
    fn next_cursor(&self) -> Option<String> {
        if !self.has_more {
            return None;
        }
        self.response_metadata
            .as_ref()
            .map(|meta| meta.next_cursor.clone())
            .filter(|cursor| !cursor.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct SlackMessage {
    ts: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    bot_id: Option<String>,
    #[serde(default)]
    subtype: Option<String>,
}

#[derive(Debug, Serialize)]
struct PostBody<'a> {
    channel: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attachments: Option<&'a [Attachment]>,
}

#[derive(Debug, Deserialize)]
struct PostMessage {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

fn check(method: &str, ok: bool, error: Option<String>) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(TransportError::Api {
            method: method.to_string(),
            message: error.unwrap_or_else(|| "unknown error".to_string()),
        })
    }
}

/// Slack timestamp for the current instant.
fn now_ts() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Sort key for a Slack `ts` ("seconds.micros"); unparseable parts are 0.
fn ts_key(ts: &str) -> (u64, u64) {
    let (secs, frac) = ts.split_once('.').unwrap_or((ts, "0"));
    (secs.parse().unwrap_or(0), frac.parse().unwrap_or(0))
}

impl SlackTransport {
    pub fn new(client: Client, config: &SlackConfig, token: impl Into<String>) -> Self {
        Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            channels: config.channels.clone(),
            cursors: HashMap::new(),
            user_id: None,
        }
    }

    pub fn with_timeout(config: &SlackConfig, token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(TransportError::MissingToken);
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::new(client, config, token))
    }

    /// Start every channel's cursor at `ts` instead of the connect time.
    pub fn with_cursor(mut self, ts: &str) -> Self {
        for channel in &self.channels {
            self.cursors.insert(channel.clone(), ts.to_string());
        }
        self
    }

    fn url(&self, method: &str) -> String {
        format!("{}/{}", self.api_base_url, method)
    }

    fn is_own(&self, message: &SlackMessage) -> bool {
        message.bot_id.is_some()
            || (self.user_id.is_some() && message.user == self.user_id)
    }

    /// Every message newer than `oldest`, across all pages.
    async fn history(&self, channel: &str, oldest: &str) -> Result<Vec<SlackMessage>> {
        let mut messages = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut query = vec![
                ("channel", channel),
                ("oldest", oldest),
                ("limit", HISTORY_PAGE_SIZE),
            ];
            if let Some(cursor) = cursor.as_deref() {
                query.push(("cursor", cursor));
            }

            let mut page: History = self
                .client
                .get(self.url("conversations.history"))
                .bearer_auth(&self.token)
                .query(&query)
                .send()
                .await?
                .json()
                .await?;
            check("conversations.history", page.ok, page.error.take())?;

            let next = page.next_cursor();
            messages.append(&mut page.messages);
            match next {
                Some(next) => cursor = Some(next),
                None => return Ok(messages),
            }
        }
    }
}

#[async_trait]
impl ChatTransport for SlackTransport {
    async fn connect(&mut self) -> Result<()> {
        let response: AuthTest = self
            .client
            .post(self.url("auth.test"))
            .bearer_auth(&self.token)
            .send()
            .await?
            .json()
            .await?;
        check("auth.test", response.ok, response.error)?;

        self.user_id = response.user_id;
        let start = now_ts();
        for channel in &self.channels {
            self.cursors
                .entry(channel.clone())
                .or_insert_with(|| start.clone());
        }
        log::info!(
            "Connected to Slack as {}, watching {} channel(s)",
            self.user_id.as_deref().unwrap_or("unknown user"),
            self.channels.len()
        );
        Ok(())
    }

    async fn receive(&mut self) -> Result<Vec<IncomingMessage>> {
        let mut batches = Vec::with_capacity(self.channels.len());
        for channel in &self.channels {
            let oldest = self
                .cursors
                .get(channel)
                .ok_or(TransportError::NotConnected)?;
            let messages = self.history(channel, oldest).await?;
            batches.push((channel.clone(), oldest.clone(), messages));
        }

        let mut incoming = Vec::new();
        for (channel, oldest, mut messages) in batches {
            // Newest first on the wire.
            let floor = ts_key(&oldest);
            messages.retain(|m| ts_key(&m.ts) > floor);
            messages.sort_by_key(|m| ts_key(&m.ts));

            if let Some(newest) = messages.last() {
                self.cursors.insert(channel.clone(), newest.ts.clone());
            }

            incoming.extend(
                messages
                    .into_iter()
                    .filter(|m| m.subtype.is_none() && !self.is_own(m))
                    .filter_map(|m| m.text)
                    .map(|text| IncomingMessage {
                        channel: channel.clone(),
                        text,
                    }),
            );
        }

        Ok(incoming)
    }

    async fn send(&self, channel: &str, reply: &Reply) -> Result<()> {
        let body = match reply {
            Reply::Text(text) => PostBody {
                channel,
                text: Some(text.as_str()),
                attachments: None,
            },
            Reply::Attachments(attachments) => PostBody {
                channel,
                text: None,
                attachments: Some(attachments.as_slice()),
            },
        };

        let response: PostMessage = self
            .client
            .post(self.url("chat.postMessage"))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;
        check("chat.postMessage", response.ok, response.error)
    }
}
