//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use gateways::{MercadoPagoConfig, TwilioConfig};
use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Server configuration.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `DATA_FILE` — enrollment record document (default: `"students.json"`)
/// - `CHECKOUT_RETURN_URL` — where the payer lands after checkout
/// - `HTTP_TIMEOUT_SECS` — outbound request timeout (default: `15`)
/// - `MP_ACCESS_TOKEN` (required), `MP_API_BASE`
/// - `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN`, `TWILIO_WHATSAPP_NUMBER` (required),
///   `TWILIO_API_BASE`
/// - `DISCORD_WEBHOOK_URL` — optional alert channel
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_file: PathBuf,
    pub checkout_return_url: String,
    pub http_timeout: Duration,
    pub mercadopago: MercadoPagoConfig,
    pub twilio: TwilioConfig,
    pub discord_webhook_url: Option<String>,
}

pub const DEFAULT_RETURN_URL: &str = "https://www.cedbrasilia.com.br/obrigado";
pub const DEFAULT_MP_API_BASE: &str = "https://api.mercadopago.com";
pub const DEFAULT_TWILIO_API_BASE: &str = "https://api.twilio.com";

impl Config {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which returns a variable's value if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| optional(key).ok_or(ConfigError::Missing(key));

        let port: u16 = match optional("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value })?,
            None => 3000,
        };
        let timeout_secs: u64 = match optional("HTTP_TIMEOUT_SECS") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                key: "HTTP_TIMEOUT_SECS",
                value,
            })?,
            None => 15,
        };
        let http_timeout = Duration::from_secs(timeout_secs);

        Ok(Self {
            host: optional("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            data_file: optional("DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("students.json")),
            checkout_return_url: optional("CHECKOUT_RETURN_URL")
                .unwrap_or_else(|| DEFAULT_RETURN_URL.to_string()),
            http_timeout,
            mercadopago: MercadoPagoConfig {
                access_token: required("MP_ACCESS_TOKEN")?,
                base_url: optional("MP_API_BASE")
                    .unwrap_or_else(|| DEFAULT_MP_API_BASE.to_string()),
                timeout: http_timeout,
            },
            twilio: TwilioConfig {
                account_sid: required("TWILIO_ACCOUNT_SID")?,
                auth_token: required("TWILIO_AUTH_TOKEN")?,
                from_number: required("TWILIO_WHATSAPP_NUMBER")?,
                base_url: optional("TWILIO_API_BASE")
                    .unwrap_or_else(|| DEFAULT_TWILIO_API_BASE.to_string()),
                timeout: http_timeout,
            },
            discord_webhook_url: optional("DISCORD_WEBHOOK_URL"),
        })
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
