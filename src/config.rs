//! Profile form configuration.

use crate::error::ProfileResult;
use serde::{Deserialize, Serialize};

/// Default confirmation shown after a successful save.
pub const DEFAULT_CONFIRMATION: &str = "Your profile information has been successfully saved.";

/// Configuration for a profile form.
///
/// ```rust
/// use profile_form::ProfileFormConfig;
///
/// let config = ProfileFormConfig::default()
///     .with_cache_key("profile.cache")
///     .with_direct_cache_lookup(true);
/// assert_eq!(config.cache_key, "profile.cache");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ProfileFormConfig {
    /// Well-known session cache key.
    ///
    /// By default this entry holds the *name* of the entry containing the
    /// cached user record, mirroring how hosted-UI SDKs index local storage.
    pub cache_key: String,

    /// Treat `cache_key` as holding the user record itself.
    pub direct_cache_lookup: bool,

    /// Message set as the confirmation after a successful save.
    pub confirmation_message: String,

    /// Link target of the separate password-change flow.
    pub change_password_path: String,

    /// Write the saved attributes back to the session cache after a
    /// successful submit, so the next load sees them.
    pub write_back_cache: bool,
}

impl Default for ProfileFormConfig {
    fn default() -> Self {
        Self {
            cache_key: "userDataKey".to_string(),
            direct_cache_lookup: false,
            confirmation_message: DEFAULT_CONFIRMATION.to_string(),
            change_password_path: "/change-password".to_string(),
            write_back_cache: true,
        }
    }
}

impl ProfileFormConfig {
    /// Parse a JSON configuration document. Missing fields take defaults.
    pub fn from_json(raw: &str) -> ProfileResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn with_cache_key(mut self, key: impl Into<String>) -> Self {
        self.cache_key = key.into();
        self
    }

    pub fn with_direct_cache_lookup(mut self, direct: bool) -> Self {
        self.direct_cache_lookup = direct;
        self
    }

    pub fn with_confirmation_message(mut self, message: impl Into<String>) -> Self {
        self.confirmation_message = message.into();
        self
    }

    pub fn with_change_password_path(mut self, path: impl Into<String>) -> Self {
        self.change_password_path = path.into();
        self
    }

    pub fn with_write_back_cache(mut self, enabled: bool) -> Self {
        self.write_back_cache = enabled;
        self
    }
}
