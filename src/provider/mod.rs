//! Identity provider abstraction.
//!
//! The identity provider owns the user record. The form consumes three
//! calls from it: read the current user's attributes, resolve the
//! currently authenticated session, and update attributes for that
//! session. Everything else (sign-in, token refresh, password change) is
//! the provider's business.
//!
//! # Example Usage
//!
//! ```rust
//! use profile_form::provider::{IdentityProvider, InMemoryIdentityProvider};
//! use profile_form::AttributeMap;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut attributes = AttributeMap::new();
//! attributes.set("email", "a@b.com");
//! let provider = InMemoryIdentityProvider::new("ann", attributes);
//!
//! let info = provider.current_user_info().await?;
//! assert_eq!(info.attributes.get("email"), Some("a@b.com"));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod in_memory;

pub use error::ProviderError;
pub use in_memory::{InMemoryIdentityProvider, InMemorySession, ProviderCallCounts};

use crate::attributes::AttributeMap;
use crate::changes::ChangeSet;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Current-user response from the identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub attributes: AttributeMap,
}

impl UserInfo {
    pub fn new(attributes: AttributeMap) -> Self {
        Self {
            attributes,
            ..Self::default()
        }
    }
}

/// The identity provider calls consumed by the profile form.
///
/// All three calls are asynchronous and may fail. `update_attributes` is
/// treated as atomic: either every key of the change set is persisted or
/// none is.
pub trait IdentityProvider: Send + Sync {
    /// Error type for provider calls. Its `Display` output is what the
    /// user sees in the error alert.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Handle identifying an authenticated session.
    type Session: Send + Sync;

    /// Fetch the current user's attributes.
    fn current_user_info(&self) -> impl Future<Output = Result<UserInfo, Self::Error>> + Send;

    /// Resolve (re-authenticate) the current session.
    fn current_session(&self) -> impl Future<Output = Result<Self::Session, Self::Error>> + Send;

    /// Persist exactly the keys and values in `changes` for `session`.
    fn update_attributes(
        &self,
        session: &Self::Session,
        changes: &ChangeSet,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
