//! Webhook channel — generic JSON POST for website contact-form integrations.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::channels::{Channel, InboundItem};
use crate::error::ChannelError;

/// Webhook channel configuration. The target URL is optional; without one
/// the channel is registered but every send fails.
#[derive(Debug, Clone, Default)]
pub struct WebhookConfig {
    pub url: Option<String>,
}

impl WebhookConfig {
    /// Build config from the optional `WEBHOOK_URL` environment variable.
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("WEBHOOK_URL").ok(),
        }
    }
}

/// Webhook channel — fire-and-forget JSON POST, plus an inbound buffer.
pub struct WebhookChannel {
    config: WebhookConfig,
    inbox: Mutex<Vec<InboundItem>>,
    client: reqwest::Client,
}

impl WebhookChannel {
    pub fn new(config: WebhookConfig) -> Self {
        Self {
            config,
            inbox: Mutex::new(Vec::new()),
            client: reqwest::Client::new(),
        }
    }

    /// Hand an inbound item to the channel's buffer.
    ///
    /// Intended for a webhook receiver endpoint; nothing in this core calls
    /// it yet, so `receive` stays empty in the shipped wiring.
    pub fn push_inbound(&self, item: InboundItem) {
        self.inbox.lock().unwrap().push(item);
    }

    async fn submit(&self, recipient: &str, text: &str) -> Result<(), ChannelError> {
        let url = self
            .config
            .url
            .as_deref()
            .ok_or_else(|| ChannelError::NotConfigured {
                name: "website".into(),
                reason: "no webhook URL".into(),
            })?;

        // Delivery is fire-and-forget: a completed POST counts as success
        // and the response status is not checked.
        self.client
            .post(url)
            .json(&serde_json::json!({
                "message": text,
                "to": recipient,
            }))
            .send()
            .await
            .map_err(|e| ChannelError::Http(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl Channel for WebhookChannel {
    fn name(&self) -> &str {
        "website"
    }

    async fn send(&self, recipient: &str, text: &str) -> bool {
        match self.submit(recipient, text).await {
            Ok(()) => {
                tracing::info!(recipient, "Webhook posted");
                true
            }
            Err(e) => {
                tracing::warn!(recipient, error = %e, "Webhook send failed");
                false
            }
        }
    }

    fn receive(&self) -> Vec<InboundItem> {
        self.inbox.lock().unwrap().clone()
    }
}

// ── Tests ───────────────────────────────────────────────────────────
