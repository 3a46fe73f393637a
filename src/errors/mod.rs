//! Unified error handling for backend calls and list-view operations.

use reqwest::StatusCode;
use serde::Deserialize;

/// Error body the backend may attach to a failed response.
///
/// Every field is optional; anything that does not parse is treated as
/// "no server message".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerErrorBody {
    pub message: Option<String>,
}

impl ServerErrorBody {
    /// Extract the human-readable message from a raw response body.
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<Self>(body)
            .ok()
            .and_then(|b| b.message)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}

/// Application error type for the list-management core.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Backend returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Http {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl AppError {
    /// The message the server attached to the failure, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text shown to the user: the server message verbatim when present,
    /// otherwise the operation-specific fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}
