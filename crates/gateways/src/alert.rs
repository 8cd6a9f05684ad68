//! Operational alert sinks.
//!
//! Alerts are best-effort: a sink never returns an error, it logs delivery
//! failures and moves on.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

/// Receives human-readable alerts about failures that were not surfaced to a caller.
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Delivers an alert message.
    async fn alert(&self, message: &str);
}

/// Discards all alerts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAlertSink;

#[async_trait]
impl AlertSink for NoopAlertSink {
    async fn alert(&self, _message: &str) {}
}

/// Posts alerts to a Discord channel webhook as code blocks.
#[derive(Debug, Clone)]
pub struct DiscordAlertSink {
    http: reqwest::Client,
    webhook_url: String,
}

impl DiscordAlertSink {
    /// Builds a sink posting to `webhook_url`.
    pub fn new(webhook_url: impl Into<String>, timeout: Duration) -> crate::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            webhook_url: webhook_url.into(),
        })
    }
}

fn discord_payload(message: &str) -> serde_json::Value {
    serde_json::json!({ "content": format!("```{message}```") })
}

#[async_trait]
impl AlertSink for DiscordAlertSink {
    async fn alert(&self, message: &str) {
        let result = self
            .http
            .post(&self.webhook_url)
            .json(&discord_payload(message))
            .send()
            .await
            .and_then(|r| r.error_for_status());

        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to deliver alert to Discord");
        }
    }
}

/// In-memory alert sink for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAlertSink {
    alerts: Arc<Mutex<Vec<String>>>,
}

impl InMemoryAlertSink {
    /// Creates a new empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every alert received so far.
    pub async fn alerts(&self) -> Vec<String> {
        self.alerts.lock().await.clone()
    }
}

#[async_trait]
impl AlertSink for InMemoryAlertSink {
    async fn alert(&self, message: &str) {
        self.alerts.lock().await.push(message.to_string());
    }
}
