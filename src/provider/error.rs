//! Errors raised by the bundled identity provider implementation.

use thiserror::Error;

/// Errors that can occur during identity provider calls.
///
/// Messages are written for end users: the form shows them verbatim
/// followed by "Please try again."
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("The user is not authenticated")]
    NotAuthenticated,

    #[error("Your session has expired")]
    SessionExpired,

    #[error("Invalid attribute '{attribute}': {message}")]
    InvalidAttribute {
        /// Key of the rejected attribute
        attribute: String,
        /// Description of why the value was rejected
        message: String,
    },

    #[error("Attempt limit exceeded, please try after some time")]
    LimitExceeded,

    #[error("Network error: {message}")]
    Network {
        /// Description of the transport failure
        message: String,
    },
}

impl ProviderError {
    pub fn invalid_attribute(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            attribute: attribute.into(),
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }
}
