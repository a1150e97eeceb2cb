//! Async driver connecting a [`ProfileForm`] to its collaborators.

use super::{LoadState, ProfileForm, loader};
use crate::cache::SessionCache;
use crate::config::ProfileFormConfig;
use crate::error::{ProfileError, ProfileResult};
use crate::provider::IdentityProvider;
use log::{debug, warn};

/// Owns a profile form together with the identity provider and session
/// cache it talks to.
///
/// Remote failures are recorded on the form (as the load failure or the
/// visible error) and also returned, so callers can either render the
/// form state or react to the `Result`.
///
/// ```rust
/// use profile_form::{AttributeMap, ProfileEditor, ProfileFormConfig};
/// use profile_form::cache::InMemorySessionCache;
/// use profile_form::provider::InMemoryIdentityProvider;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut attrs = AttributeMap::new();
/// attrs.set("custom:firstName", "Ann");
/// let provider = InMemoryIdentityProvider::new("ann", attrs);
///
/// let mut editor = ProfileEditor::new(
///     provider,
///     InMemorySessionCache::new(),
///     ProfileFormConfig::default(),
/// );
/// editor.load().await?;
/// editor.form_mut().set_field("custom:firstName", "Anna");
/// editor.submit().await?;
/// assert!(!editor.form().is_dirty());
/// # Ok(())
/// # }
/// ```
pub struct ProfileEditor<P, C> {
    provider: P,
    cache: C,
    form: ProfileForm,
}

impl<P, C> ProfileEditor<P, C>
where
    P: IdentityProvider,
    C: SessionCache,
{
    pub fn new(provider: P, cache: C, config: ProfileFormConfig) -> Self {
        Self {
            provider,
            cache,
            form: ProfileForm::new(config),
        }
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    /// Mutable access for field edits and alert dismissal.
    pub fn form_mut(&mut self) -> &mut ProfileForm {
        &mut self.form
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Populate the form from the session cache or the provider.
    ///
    /// A no-op once attributes are loaded, so pending edits are kept.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::LoadFailure`] if the provider call fails; the
    /// form is then in [`LoadState::Failed`] and [`reload`](Self::reload)
    /// may be used to retry.
    pub async fn load(&mut self) -> ProfileResult<()> {
        if self.form.is_loaded() {
            debug!("Load requested on a loaded form, keeping current draft");
            return Ok(());
        }
        match loader::load_attributes(&self.provider, &self.cache, self.form.config()).await {
            Ok(loaded) => {
                self.form.on_loaded(loaded.attributes, loaded.source);
                Ok(())
            }
            Err(e) => {
                self.form.on_load_failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Retry a failed load. A no-op once attributes are loaded.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub async fn reload(&mut self) -> ProfileResult<()> {
        if !self.form.begin_reload() {
            debug!("Reload requested on a loaded form, ignoring");
            return Ok(());
        }
        self.load().await
    }

    /// Submit the changed attributes.
    ///
    /// Resolves the current session, then sends exactly the change set
    /// computed when the submission began. On success the submitted draft
    /// becomes the baseline and, if configured, the session cache is
    /// refreshed; a cache write failure is logged and does not fail the
    /// submission.
    ///
    /// # Errors
    ///
    /// * Guard errors from [`ProfileForm::begin_submit`], with no state change
    /// * [`ProfileError::SessionFailure`] / [`ProfileError::UpdateFailure`],
    ///   also recorded as the form's visible error
    pub async fn submit(&mut self) -> ProfileResult<()> {
        if matches!(self.form.load_state(), LoadState::Failed(_)) {
            return Err(ProfileError::NotLoaded);
        }
        let pending = self.form.begin_submit()?;

        let result = async {
            let session = self
                .provider
                .current_session()
                .await
                .map_err(ProfileError::session)?;
            self.provider
                .update_attributes(&session, pending.changes())
                .await
                .map_err(ProfileError::update)
        }
        .await;

        if let Err(e) = result {
            self.form.on_failure(e.to_string());
            return Err(e);
        }

        self.form.on_success(pending);

        if self.form.config().write_back_cache
            && let Some(baseline) = self.form.baseline()
            && let Err(e) =
                loader::store_attributes(&self.cache, self.form.config(), baseline).await
        {
            warn!("Saved profile but could not refresh session cache: {e}");
        }

        Ok(())
    }
}
