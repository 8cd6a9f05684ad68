//! Twilio implementation of [`Messenger`].

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{GatewayError, Result};
use crate::messaging::{MessageReceipt, Messenger};

const PROVIDER: &str = "twilio";

/// Credentials and sender settings for the Twilio Messages API.
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// WhatsApp-enabled sender number, e.g. `+14155238886`.
    pub from_number: String,
    /// API root, normally `https://api.twilio.com`.
    pub base_url: String,
    pub timeout: Duration,
}

/// Messenger sending WhatsApp messages through Twilio.
#[derive(Debug, Clone)]
pub struct TwilioMessenger {
    http: reqwest::Client,
    config: TwilioConfig,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    sid: Option<String>,
}

impl TwilioMessenger {
    /// Builds a messenger with its own HTTP client.
    pub fn new(config: TwilioConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.base_url.trim_end_matches('/'),
            self.config.account_sid
        )
    }

    fn from_address(&self) -> String {
        format!("whatsapp:{}", self.config.from_number)
    }
}

fn to_address(digits: &str) -> String {
    format!("whatsapp:+{digits}")
}

#[async_trait]
impl Messenger for TwilioMessenger {
    #[tracing::instrument(skip(self, body))]
    async fn send_whatsapp(&self, to_digits: &str, body: &str) -> Result<MessageReceipt> {
        if to_digits.is_empty() || !to_digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(GatewayError::Rejected(format!(
                "recipient {to_digits:?} is not a digit string"
            )));
        }

        let from = self.from_address();
        let to = to_address(to_digits);
        let form = [("From", from.as_str()), ("To", to.as_str()), ("Body", body)];

        let response = self
            .http
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&form)
            .send()
            .await?;
        let response = GatewayError::check(PROVIDER, response).await?;
        let message: MessageResponse = response.json().await?;

        let message_id = message.sid.ok_or_else(|| GatewayError::InvalidResponse {
            provider: PROVIDER,
            reason: "message has no sid".to_string(),
        })?;
        Ok(MessageReceipt { message_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messenger() -> TwilioMessenger {
        TwilioMessenger::new(TwilioConfig {
            account_sid: "AC123".to_string(),
            auth_token: "secret".to_string(),
            from_number: "+14155238886".to_string(),
            base_url: "https://api.twilio.com".to_string(),
            timeout: crate::DEFAULT_TIMEOUT,
        })
        .unwrap()
    }

    #[test]
    fn test_addresses() {
        let m = messenger();
        assert_eq!(m.from_address(), "whatsapp:+14155238886");
        assert_eq!(to_address("5511999999999"), "whatsapp:+5511999999999");
    }

    #[test]
    fn test_messages_url() {
        assert_eq!(
            messenger().messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[tokio::test]
    async fn test_rejects_non_digit_recipient() {
        let result = messenger().send_whatsapp("+55 11", "hi").await;
        assert!(matches!(result, Err(GatewayError::Rejected(_))));

        let result = messenger().send_whatsapp("", "hi").await;
        assert!(matches!(result, Err(GatewayError::Rejected(_))));
    }
}
