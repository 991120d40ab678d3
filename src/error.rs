//! Watch error taxonomy
//!
//! Every failure a poll cycle can hit maps to one of these variants,
//! so the loop dispatches on explicit cases instead of a catch-any.

use thiserror::Error;

/// Errors that can occur during a poll cycle
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing field '{0}' in API response")]
    MissingField(&'static str),

    #[error("Field '{field}' has wrong type: expected {expected}")]
    Shape {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Unknown homework status: '{0}'")]
    UnknownStatus(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),
}

impl WatchError {
    /// Check if this error came from the messaging backend
    ///
    /// Delivery failures are terminal for the message but never for
    /// the cycle, so the watcher treats them separately.
    pub fn is_delivery(&self) -> bool {
        matches!(self, WatchError::Delivery(_))
    }
}
