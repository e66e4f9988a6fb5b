//! Group-chat channel — bot message posting via the chat service's bot API.

use async_trait::async_trait;
use rostercall_core::config::ChatConfig;
use rostercall_core::error::{Result, RosterError};
use rostercall_core::traits::ChatSink;

/// Group-chat bot channel. In dry-run mode the rendered message goes to the
/// log and nothing is sent.
pub struct GroupChatChannel {
    config: ChatConfig,
    client: reqwest::Client,
    dry_run: bool,
}

impl GroupChatChannel {
    pub fn new(config: ChatConfig, dry_run: bool) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            dry_run,
        }
    }

    fn post_url(&self) -> String {
        format!(
            "{}/bots/post?token={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.access_token
        )
    }
}

#[async_trait]
impl ChatSink for GroupChatChannel {
    async fn post(&self, text: &str, picture_url: Option<&str>) -> Result<()> {
        if self.dry_run {
            tracing::info!("🔇 Dry run, message not sent:\n{text}");
            return Ok(());
        }

        let mut body = serde_json::json!({
            "bot_id": self.config.bot_id,
            "text": text,
        });
        if let Some(url) = picture_url {
            body["picture_url"] = serde_json::Value::String(url.to_string());
        }

        let response = self
            .client
            .post(self.post_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| RosterError::Channel(format!("bot post failed: {e}")))?;

        // The bot API answers 202 on success. Anything else delivered over
        // HTTP is logged but not treated as a failed tick.
        let status = response.status().as_u16();
        if status != 202 {
            tracing::warn!("⚠️ Chat service answered {status} instead of 202");
        } else {
            tracing::info!("📣 Roster announcement posted");
        }
        Ok(())
    }
}
