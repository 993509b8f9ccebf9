use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Unified error type for the relay service
#[derive(Error, Debug)]
pub enum RelayError {
    // Request errors
    #[error("Missing url parameter")]
    MissingUrlParameter,

    // Per-attempt upstream errors (handled inside the retry loop)
    #[error("HTTP {0}")]
    UpstreamStatus(u16),

    #[error("Empty response")]
    UpstreamEmptyBody,

    #[error("{0}")]
    Transport(String),

    // Terminal failure after the retry loop is exhausted
    #[error("Failed to fetch from upstream after {attempts} attempts")]
    Exhausted { attempts: u32, last_error: String },

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for relay operations
pub type Result<T> = std::result::Result<T, RelayError>;

impl RelayError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            RelayError::MissingUrlParameter => StatusCode::BAD_REQUEST,

            // 502 Bad Gateway - per-attempt failures; these are consumed by
            // the retry loop and never surface as responses themselves
            RelayError::UpstreamStatus(_)
            | RelayError::UpstreamEmptyBody
            | RelayError::Transport(_) => StatusCode::BAD_GATEWAY,

            // 500 Internal Server Error
            RelayError::Exhausted { .. }
            | RelayError::InvalidConfig(_)
            | RelayError::Io(_)
            | RelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

// Implement IntoResponse for API error responses. Exhaustion additionally
// carries the last per-attempt failure so callers can diagnose it.
impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            RelayError::Exhausted { last_error, .. } => json!({
                "error": self.to_string(),
                "lastError": last_error,
            }),
            _ => json!({
                "error": self.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

// Convert from reqwest errors (timeouts, DNS, connection failures)
impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::Transport(err.to_string())
    }
}
