//! Error types shared across the converter.
//!
//! None of these are fatal to a running process: the orchestrator logs them and
//! keeps the affected URL unchanged. Binaries wrap them in `anyhow` at startup.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Rewriting a single URL failed.
    #[error("Transform failed for {url}: {message}")]
    Transform { url: String, message: String },

    /// A rewritten URL did not pass its post-rewrite check.
    #[error("Verification failed for {url}: {reason}")]
    Verification { url: String, reason: String },

    /// The mapping file could not be read or written.
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn transform(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transform {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn verification(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Verification {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence(message.into())
    }
}
