//! Error types for the router console client.

use thiserror::Error;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the router gateway.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error during client setup.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// HTTP request failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gateway returned a non-success response.
    #[error("Request failed ({status}): {detail}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error detail from the gateway, verbatim.
        detail: String,
    },

    /// Response parsing failed.
    #[error("Failed to parse response: {message}")]
    Parse {
        /// Error message describing the parse failure.
        message: String,
    },

    /// Timeout waiting for a response.
    #[error("Request timed out after {duration_ms}ms")]
    Timeout {
        /// Duration in milliseconds before timeout.
        duration_ms: u64,
    },

    /// Connection to the gateway failed.
    #[error("Connection error: {message}")]
    Connection {
        /// Error message describing the connection failure.
        message: String,
    },
}

impl Error {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an API error from response details.
    pub fn api(status: u16, detail: impl Into<String>) -> Self {
        Self::Api {
            status,
            detail: detail.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Get the HTTP status code if available.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable description suitable for rendering in the transcript.
    ///
    /// API errors surface the gateway's `detail` field verbatim; transport
    /// failures surface the underlying failure description.
    pub fn display_detail(&self) -> String {
        match self {
            Self::Api { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }
}

/// Error body returned by the gateway on non-success responses.
///
/// The gateway reports failures as `{"detail": "..."}`.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable error detail.
    pub detail: String,
}

impl ApiErrorBody {
    /// Parse an error body, falling back to a generic message when the
    /// payload is not the expected shape.
    pub fn detail_or_default(body: &str) -> String {
        serde_json::from_str::<Self>(body)
            .map(|b| b.detail)
            .unwrap_or_else(|_| "Request failed".to_string())
    }
}
