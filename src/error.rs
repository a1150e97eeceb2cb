//! Error types for profile form operations.
//!
//! Every failure a collaborator can produce ends up here. At the form
//! boundary these are flattened into the user-visible error string, so
//! callers of [`crate::ProfileEditor`] rarely need to match on them; the
//! variants exist for logging and for callers driving the state machine
//! by hand.

/// Main error type for profile form operations.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// The current user's attributes could not be fetched at load time.
    #[error("{message}")]
    LoadFailure {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The provider could not identify the current session at submit time.
    #[error("{message}")]
    SessionFailure {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The provider rejected the attribute update.
    #[error("{message}")]
    UpdateFailure {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An operation that needs loaded attributes ran before load completed.
    #[error("Profile attributes have not been loaded")]
    NotLoaded,

    /// Submit was requested while nothing differs from the saved attributes.
    #[error("There are no profile changes to submit")]
    NothingToSubmit,

    /// Submit was requested while a previous submission is still in flight.
    #[error("A profile update is already in progress")]
    SubmitInProgress,

    /// A choice field received a code outside its option set.
    #[error("Invalid value '{value}' for field '{field}'")]
    InvalidChoice { field: String, value: String },

    /// Session cache failure.
    #[error("Session cache error: {0}")]
    Cache(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProfileError {
    /// Wrap an identity provider error raised while loading.
    pub fn load<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::LoadFailure {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Wrap an identity provider error raised while resolving the session.
    pub fn session<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::SessionFailure {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Wrap an identity provider error raised while updating attributes.
    pub fn update<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::UpdateFailure {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Wrap a session cache error.
    pub fn cache<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Cache(Box::new(err))
    }

    /// Whether this error came from a remote call rather than a local guard.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::LoadFailure { .. } | Self::SessionFailure { .. } | Self::UpdateFailure { .. }
        )
    }
}

/// Result type alias for profile form operations.
pub type ProfileResult<T> = Result<T, ProfileError>;
