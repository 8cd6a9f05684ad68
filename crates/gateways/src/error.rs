//! Collaborator error types.

use thiserror::Error;

/// Errors returned by external collaborators.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request could not be sent or the response could not be read.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status code.
    #[error("{provider} responded with status {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// The provider answered successfully but the body was not usable.
    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse {
        provider: &'static str,
        reason: String,
    },

    /// The request was refused before reaching the provider.
    #[error("Request rejected: {0}")]
    Rejected(String),
}

impl GatewayError {
    /// Turns a non-success response into a `Status` error, passing success through.
    pub(crate) async fn check(
        provider: &'static str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::Status {
            provider,
            status: status.as_u16(),
            body,
        })
    }
}

/// Convenience type alias for collaborator results.
pub type Result<T> = std::result::Result<T, GatewayError>;
