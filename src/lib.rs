//! Headless profile-editing form for identity-provider user attributes.
//!
//! Loads the current user's attributes from a session cache or an
//! identity provider, tracks edits to a fixed set of profile fields, and
//! submits only the changed attributes back to the provider.
//!
//! # Core Components
//!
//! - [`ProfileForm`] - Pure form state with synchronous transitions
//! - [`ProfileEditor`] - Async driver wiring the form to its collaborators
//! - [`IdentityProvider`] - Trait for the user-attribute backend
//! - [`SessionCache`] - Trait for the process-wide session cache
//! - [`changes`] - Baseline/draft diffing
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use profile_form::{AttributeMap, ProfileEditor, ProfileFormConfig};
//! use profile_form::cache::InMemorySessionCache;
//! use profile_form::provider::InMemoryIdentityProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = InMemoryIdentityProvider::new("ann", AttributeMap::new());
//! let mut editor = ProfileEditor::new(
//!     provider,
//!     InMemorySessionCache::new(),
//!     ProfileFormConfig::default(),
//! );
//!
//! editor.load().await?;
//! editor.form_mut().set_field("custom:zipcode", "94110");
//! if editor.form().can_submit() {
//!     editor.submit().await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The library logs through the `log` facade and installs no logger.

pub mod attributes;
pub mod cache;
pub mod changes;
pub mod config;
pub mod error;
pub mod form;
pub mod provider;

pub use attributes::{AttributeMap, ChildGender, ParentType, ProfileField, ProfileSnapshot};
pub use cache::SessionCache;
pub use changes::{ChangeSet, changed_fields, is_dirty};
pub use config::ProfileFormConfig;
pub use error::{ProfileError, ProfileResult};
pub use form::{
    FieldView, LoadSource, LoadState, PendingSubmission, ProfileEditor, ProfileForm, StatusAlert,
    SubmitState,
};
pub use provider::{IdentityProvider, UserInfo};
