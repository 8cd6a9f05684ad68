//! Messaging trait and in-memory implementation.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{GatewayError, Result};

/// Provider acknowledgement of an accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageReceipt {
    pub message_id: String,
}

/// Trait for sending WhatsApp messages.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Sends `body` to the international number given as bare digits.
    async fn send_whatsapp(&self, to_digits: &str, body: &str) -> Result<MessageReceipt>;
}

/// A message captured by [`InMemoryMessenger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub to: String,
    pub body: String,
}

#[derive(Debug, Default)]
struct InMemoryMessengerState {
    sent: Vec<SentMessage>,
    attempts: usize,
    fail_on_send: bool,
}

/// In-memory messenger for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMessenger {
    state: Arc<Mutex<InMemoryMessengerState>>,
}

impl InMemoryMessenger {
    /// Creates a new in-memory messenger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures subsequent sends to fail.
    pub async fn set_fail_on_send(&self, fail: bool) {
        self.state.lock().await.fail_on_send = fail;
    }

    /// Returns every successfully sent message.
    pub async fn sent_messages(&self) -> Vec<SentMessage> {
        self.state.lock().await.sent.clone()
    }

    /// Returns how many sends were attempted, including failed ones.
    pub async fn attempts(&self) -> usize {
        self.state.lock().await.attempts
    }
}

#[async_trait]
impl Messenger for InMemoryMessenger {
    async fn send_whatsapp(&self, to_digits: &str, body: &str) -> Result<MessageReceipt> {
        let mut state = self.state.lock().await;
        state.attempts += 1;

        if state.fail_on_send {
            return Err(GatewayError::Rejected("Messaging unavailable".to_string()));
        }

        state.sent.push(SentMessage {
            to: to_digits.to_string(),
            body: body.to_string(),
        });
        Ok(MessageReceipt {
            message_id: format!("SM{:04}", state.sent.len()),
        })
    }
}
