//! Session cache error types.

use thiserror::Error;

/// Errors that can occur during session cache operations.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    /// The backing store is not reachable.
    #[error("Session cache unavailable: {message}")]
    Unavailable { message: String },
}

impl CacheError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}
