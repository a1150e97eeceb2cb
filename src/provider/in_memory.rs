//! In-memory identity provider.
//!
//! Keeps a single user record in memory and implements
//! [`IdentityProvider`] against it. Calls are counted and every call can
//! be primed to fail once, which makes it suitable for tests, demos and
//! local development.

use crate::attributes::{AttributeMap, keys};
use crate::changes::ChangeSet;
use crate::provider::{IdentityProvider, ProviderError, UserInfo};
use log::{debug, info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Attributes the provider refuses to modify.
const IMMUTABLE_ATTRIBUTES: &[&str] = &[keys::SUBJECT];

/// Session handle issued by [`InMemoryIdentityProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemorySession {
    pub session_id: Uuid,
    pub username: String,
}

#[derive(Debug, Default)]
struct FailureSlots {
    user_info: Option<ProviderError>,
    session: Option<ProviderError>,
    update: Option<ProviderError>,
}

#[derive(Debug)]
struct UserState {
    attributes: AttributeMap,
    session_id: Option<Uuid>,
    updates: Vec<ChangeSet>,
}

#[derive(Debug, Default)]
struct CallCounters {
    user_info: AtomicUsize,
    session: AtomicUsize,
    update: AtomicUsize,
}

/// Snapshot of how many times each provider call was made.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProviderCallCounts {
    pub user_info: usize,
    pub session: usize,
    pub update: usize,
}

/// Single-user identity provider backed by memory.
///
/// Clones share state, so a test can keep one clone for assertions while
/// the editor owns another.
#[derive(Debug, Clone)]
pub struct InMemoryIdentityProvider {
    username: String,
    state: Arc<RwLock<UserState>>,
    failures: Arc<RwLock<FailureSlots>>,
    calls: Arc<CallCounters>,
}

impl InMemoryIdentityProvider {
    /// Create a provider with a signed-in user holding `attributes`.
    pub fn new(username: impl Into<String>, attributes: AttributeMap) -> Self {
        Self {
            username: username.into(),
            state: Arc::new(RwLock::new(UserState {
                attributes,
                session_id: Some(Uuid::new_v4()),
                updates: Vec::new(),
            })),
            failures: Arc::new(RwLock::new(FailureSlots::default())),
            calls: Arc::new(CallCounters::default()),
        }
    }

    /// The attributes as currently persisted.
    pub async fn attributes(&self) -> AttributeMap {
        self.state.read().await.attributes.clone()
    }

    /// Every change set accepted so far, oldest first.
    pub async fn updates(&self) -> Vec<ChangeSet> {
        self.state.read().await.updates.clone()
    }

    pub fn call_counts(&self) -> ProviderCallCounts {
        ProviderCallCounts {
            user_info: self.calls.user_info.load(Ordering::SeqCst),
            session: self.calls.session.load(Ordering::SeqCst),
            update: self.calls.update.load(Ordering::SeqCst),
        }
    }

    /// End the current session; later session lookups fail.
    pub async fn sign_out(&self) {
        self.state.write().await.session_id = None;
    }

    /// Start a fresh session, invalidating handles from the previous one.
    pub async fn sign_in(&self) {
        self.state.write().await.session_id = Some(Uuid::new_v4());
    }

    /// Make the next `current_user_info` call fail with `error`.
    pub async fn fail_next_user_info(&self, error: ProviderError) {
        self.failures.write().await.user_info = Some(error);
    }

    /// Make the next `current_session` call fail with `error`.
    pub async fn fail_next_session(&self, error: ProviderError) {
        self.failures.write().await.session = Some(error);
    }

    /// Make the next `update_attributes` call fail with `error`.
    pub async fn fail_next_update(&self, error: ProviderError) {
        self.failures.write().await.update = Some(error);
    }
}

impl IdentityProvider for InMemoryIdentityProvider {
    type Error = ProviderError;
    type Session = InMemorySession;

    async fn current_user_info(&self) -> Result<UserInfo, Self::Error> {
        self.calls.user_info.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failures.write().await.user_info.take() {
            return Err(err);
        }

        let state = self.state.read().await;
        if state.session_id.is_none() {
            return Err(ProviderError::NotAuthenticated);
        }

        debug!(
            "Serving {} attribute(s) for '{}'",
            state.attributes.len(),
            self.username
        );
        Ok(UserInfo {
            id: state.attributes.get(keys::SUBJECT).map(str::to_string),
            username: Some(self.username.clone()),
            attributes: state.attributes.clone(),
        })
    }

    async fn current_session(&self) -> Result<Self::Session, Self::Error> {
        self.calls.session.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failures.write().await.session.take() {
            return Err(err);
        }

        match self.state.read().await.session_id {
            Some(session_id) => Ok(InMemorySession {
                session_id,
                username: self.username.clone(),
            }),
            None => Err(ProviderError::NotAuthenticated),
        }
    }

    async fn update_attributes(
        &self,
        session: &Self::Session,
        changes: &ChangeSet,
    ) -> Result<(), Self::Error> {
        self.calls.update.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failures.write().await.update.take() {
            warn!(
                "Rejecting attribute update for '{}': {}",
                self.username, err
            );
            return Err(err);
        }

        let mut state = self.state.write().await;
        if state.session_id != Some(session.session_id) {
            return Err(ProviderError::SessionExpired);
        }

        if let Some(key) = changes.keys().find(|k| IMMUTABLE_ATTRIBUTES.contains(k)) {
            return Err(ProviderError::invalid_attribute(
                key,
                "attribute cannot be modified",
            ));
        }

        changes.apply_to(&mut state.attributes);
        state.updates.push(changes.clone());
        info!(
            "Updated {} attribute(s) for '{}'",
            changes.len(),
            self.username
        );
        Ok(())
    }
}
