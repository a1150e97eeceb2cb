//! Profile form state and transitions.
//!
//! [`ProfileForm`] is a plain state struct. Every transition is a
//! synchronous method, so the whole edit/submit cycle can be driven and
//! tested without a UI or a provider. [`ProfileEditor`] wires the
//! transitions to the asynchronous collaborators.
//!
//! Submission follows a small state machine:
//!
//! ```text
//! Idle ──begin_submit──▶ Submitting ──on_success──▶ Succeeded
//!   ▲                        │                          │
//!   │                        └──────on_failure───▶ Failed
//!   └──────────── (edit, then begin_submit again) ──────┘
//! ```
//!
//! `begin_submit` is refused unless the form is loaded, dirty, and not
//! already submitting.
//!
//! ```rust
//! use profile_form::{AttributeMap, LoadSource, ProfileForm, ProfileFormConfig};
//!
//! let mut form = ProfileForm::new(ProfileFormConfig::default());
//! let mut attrs = AttributeMap::new();
//! attrs.set("custom:firstName", "Ann");
//! form.on_loaded(attrs, LoadSource::Provider);
//!
//! form.set_field("custom:firstName", "Anna");
//! assert!(form.is_dirty());
//!
//! let pending = form.begin_submit().unwrap();
//! assert!(!form.can_submit());
//! form.on_success(pending);
//! assert!(!form.is_dirty());
//! assert_eq!(form.baseline().unwrap().get("custom:firstName"), Some("Anna"));
//! ```

pub mod editor;
pub mod loader;
pub mod view;

pub use editor::ProfileEditor;
pub use loader::{LoadSource, LoadedAttributes};
pub use view::{ChoiceOption, FieldView, PictureProps, ProfileHeader, StatusAlert};

use crate::attributes::{AttributeMap, ChildGender, ParentType, ProfileField};
use crate::changes::{self, ChangeSet};
use crate::config::ProfileFormConfig;
use crate::error::{ProfileError, ProfileResult};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};

/// Progress of the initial attribute load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded(LoadSource),
    /// The provider call failed; carries its message. The form cannot be
    /// shown until a reload succeeds.
    Failed(String),
}

/// Progress of the latest submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// A submission in flight.
///
/// Captures the change set and the draft as they were when the submission
/// began, so later edits don't leak into what is sent or promoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    changes: ChangeSet,
    draft: AttributeMap,
}

impl PendingSubmission {
    /// The attributes to send to the provider.
    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    /// The draft the change set was computed from.
    pub fn draft(&self) -> &AttributeMap {
        &self.draft
    }
}

/// State of a single profile-editing form.
#[derive(Debug, Clone)]
pub struct ProfileForm {
    config: ProfileFormConfig,
    load_state: LoadState,
    baseline: Option<AttributeMap>,
    draft: AttributeMap,
    error: Option<String>,
    confirmation: Option<String>,
    submit_state: SubmitState,
    last_saved_at: Option<DateTime<Utc>>,
}

impl ProfileForm {
    /// Create a form that is waiting for its attributes.
    pub fn new(config: ProfileFormConfig) -> Self {
        Self {
            config,
            load_state: LoadState::Loading,
            baseline: None,
            draft: AttributeMap::new(),
            error: None,
            confirmation: None,
            submit_state: SubmitState::Idle,
            last_saved_at: None,
        }
    }

    pub fn config(&self) -> &ProfileFormConfig {
        &self.config
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_loaded(&self) -> bool {
        self.baseline.is_some()
    }

    /// Attributes as last confirmed persisted, `None` until loaded.
    pub fn baseline(&self) -> Option<&AttributeMap> {
        self.baseline.as_ref()
    }

    /// The in-progress edits.
    pub fn draft(&self) -> &AttributeMap {
        &self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn confirmation(&self) -> Option<&str> {
        self.confirmation.as_deref()
    }

    pub fn submit_state(&self) -> SubmitState {
        self.submit_state
    }

    /// When the last successful save was acknowledged.
    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
    }

    /// Seed baseline and draft with the loaded attributes.
    pub fn on_loaded(&mut self, attributes: AttributeMap, source: LoadSource) {
        debug!(
            "Profile form loaded {} attribute(s) from {source}",
            attributes.len()
        );
        self.baseline = Some(attributes.clone());
        self.draft = attributes;
        self.load_state = LoadState::Loaded(source);
    }

    /// Record that the initial load failed.
    pub fn on_load_failed(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("Profile form failed to load: {message}");
        self.load_state = LoadState::Failed(message);
    }

    /// Re-enter `Loading` after a failed load. Returns false, and leaves
    /// the state alone, if the form already holds loaded attributes.
    pub fn begin_reload(&mut self) -> bool {
        if self.is_loaded() {
            return false;
        }
        self.load_state = LoadState::Loading;
        true
    }

    /// Replace one draft value and clear any visible error. Other keys
    /// are untouched. Edits made before load are replaced by the load.
    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.draft.set(key, value);
        self.error = None;
    }

    /// Set one draft value to undefined.
    pub fn clear_field(&mut self, key: impl Into<String>) {
        self.draft.insert(key, None);
        self.error = None;
    }

    /// Typed variant of [`set_field`](Self::set_field) for the fixed fields.
    pub fn set_profile_field(&mut self, field: ProfileField, value: impl Into<String>) {
        self.set_field(field.key(), value);
    }

    pub fn set_parent_type(&mut self, parent_type: ParentType) {
        self.set_profile_field(ProfileField::ParentType, parent_type.code());
    }

    pub fn set_child_gender(&mut self, child_gender: ChildGender) {
        self.set_profile_field(ProfileField::ChildGender, child_gender.code());
    }

    /// Value a choice control shows: the draft value when defined,
    /// otherwise the baseline value.
    pub fn choice_value(&self, key: &str) -> Option<&str> {
        self.draft
            .get(key)
            .or_else(|| self.baseline.as_ref().and_then(|b| b.get(key)))
    }

    /// The attributes that would be submitted now. Empty before load.
    pub fn changes(&self) -> ChangeSet {
        match &self.baseline {
            Some(baseline) => changes::changed_fields(baseline, &self.draft),
            None => ChangeSet::default(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        changes::is_dirty(self.baseline.as_ref(), &self.draft)
    }

    /// Whether the submit action should be enabled.
    pub fn can_submit(&self) -> bool {
        self.submit_state != SubmitState::Submitting && self.is_dirty()
    }

    /// Start a submission.
    ///
    /// # Errors
    ///
    /// * [`ProfileError::NotLoaded`] before the attributes are loaded
    /// * [`ProfileError::SubmitInProgress`] while another submission runs
    /// * [`ProfileError::NothingToSubmit`] when the draft matches the baseline
    ///
    /// State is left unchanged on error.
    pub fn begin_submit(&mut self) -> ProfileResult<PendingSubmission> {
        let Some(baseline) = &self.baseline else {
            return Err(ProfileError::NotLoaded);
        };
        if self.submit_state == SubmitState::Submitting {
            return Err(ProfileError::SubmitInProgress);
        }

        let changes = changes::changed_fields(baseline, &self.draft);
        if changes.is_empty() {
            return Err(ProfileError::NothingToSubmit);
        }

        info!("Submitting {} changed profile attribute(s)", changes.len());
        self.error = None;
        self.submit_state = SubmitState::Submitting;
        Ok(PendingSubmission {
            changes,
            draft: self.draft.clone(),
        })
    }

    /// The provider acknowledged `pending`: promote its draft to baseline.
    pub fn on_success(&mut self, pending: PendingSubmission) {
        self.on_success_at(pending, Utc::now());
    }

    /// [`on_success`](Self::on_success) with an explicit save time.
    pub fn on_success_at(&mut self, pending: PendingSubmission, saved_at: DateTime<Utc>) {
        if self.submit_state != SubmitState::Submitting {
            warn!("Ignoring submit success while {:?}", self.submit_state);
            return;
        }

        info!("Saved {} profile attribute(s)", pending.changes.len());
        self.baseline = Some(pending.draft);
        self.confirmation = Some(self.config.confirmation_message.clone());
        self.error = None;
        self.submit_state = SubmitState::Succeeded;
        self.last_saved_at = Some(saved_at);
    }

    /// The submission failed: show `message`, keep baseline and draft.
    pub fn on_failure(&mut self, message: impl Into<String>) {
        let message = message.into();
        if self.submit_state != SubmitState::Submitting {
            warn!(
                "Ignoring submit failure while {:?}: {message}",
                self.submit_state
            );
            return;
        }

        warn!("Profile update failed: {message}");
        self.error = Some(message);
        self.submit_state = SubmitState::Failed;
    }

    /// Close the success alert.
    pub fn dismiss_confirmation(&mut self) {
        self.confirmation = None;
    }
}
