use std::path::PathBuf;

use hrms_core::messages::{friendly_message, BACKEND_UNAVAILABLE};

/// Errors from the backend REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status and no envelope.
    #[error("Backend error ({status}): {body}")]
    Status { status: u16, body: String },

    /// The backend answered `{ success: false, message }`.
    #[error("Backend rejected request: {message}")]
    Rejected { message: String },

    /// The backend reported success but sent no `result`.
    #[error("Backend response is missing a result")]
    MissingResult,

    /// The response body was not the expected JSON.
    #[error("Malformed backend response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A file queued for upload could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ApiError {
    /// Alert text for this failure.
    ///
    /// Server rejections surface their (translated) message; everything that
    /// looks like a transport or protocol failure gets the generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { message } => friendly_message(message),
            ApiError::Io { path, .. } => format!("Could not read file {}", path.display()),
            ApiError::Request(_)
            | ApiError::Status { .. }
            | ApiError::MissingResult
            | ApiError::Decode(_) => BACKEND_UNAVAILABLE.to_string(),
        }
    }

    /// Whether the backend was never reached or answered unintelligibly.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ApiError::Request(_) | ApiError::Status { .. } | ApiError::Decode(_)
        )
    }
}
