//! Discord REST transport for the notification sink.
//!
//! The handshake proves the bot token by fetching the bot's own identity;
//! deliveries are plain channel message posts. Failure modes surface
//! distinctly: an unresolvable channel, a permission denial, and
//! everything else at the transport level.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, info};

use super::ChannelSink;
use crate::{Result, StorewatchError};

/// Body of a channel message post.
#[derive(Serialize)]
struct MessagePayload<'a> {
    content: &'a str,
}

/// Discord REST client authenticated with a bot token.
pub struct DiscordSink {
    http: reqwest::Client,
    base_url: String,
    bot_token: String,
}

impl DiscordSink {
    /// Creates a sink against the given API base URL (no trailing slash).
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, bot_token: String) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            bot_token,
        }
    }

    fn auth_header(&self) -> String {
        format!("Bot {}", self.bot_token)
    }
}

#[async_trait]
impl ChannelSink for DiscordSink {
    async fn handshake(&self) -> Result<()> {
        let url = format!("{}/users/@me", self.base_url);
        let response = self
            .http
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(|e| StorewatchError::SinkSendFailed(format!("identity check: {e}")))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(StorewatchError::SinkSendFailed(
                "invalid bot token".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(StorewatchError::SinkSendFailed(format!(
                "identity check returned HTTP {status}"
            )));
        }

        info!("bot identity confirmed");
        Ok(())
    }

    async fn post(&self, channel_id: u64, text: &str) -> Result<()> {
        let url = format!("{}/channels/{channel_id}/messages", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&MessagePayload { content: text })
            .send()
            .await
            .map_err(|e| StorewatchError::SinkSendFailed(format!("message post: {e}")))?;

        match response.status() {
            status if status.is_success() => {
                debug!(channel_id, "message delivered");
                Ok(())
            }
            StatusCode::NOT_FOUND => Err(StorewatchError::SinkTargetNotFound { channel_id }),
            StatusCode::FORBIDDEN => Err(StorewatchError::SinkForbidden { channel_id }),
            status => Err(StorewatchError::SinkSendFailed(format!(
                "message post returned HTTP {status}"
            ))),
        }
    }
}
