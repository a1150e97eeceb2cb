//! Shared fixtures for profile form integration tests.

#![allow(dead_code)]

pub mod fixtures;

use profile_form::cache::InMemorySessionCache;
use profile_form::provider::InMemoryIdentityProvider;
use profile_form::{AttributeMap, ProfileEditor, ProfileFormConfig};

/// Route library logs to the test output. Safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub type TestEditor = ProfileEditor<InMemoryIdentityProvider, InMemorySessionCache>;

/// Editor over clones of `provider` and `cache`, so the test keeps
/// handles for assertions.
pub fn editor(provider: &InMemoryIdentityProvider, cache: &InMemorySessionCache) -> TestEditor {
    init_logging();
    ProfileEditor::new(
        provider.clone(),
        cache.clone(),
        ProfileFormConfig::default(),
    )
}

/// Editor already loaded from a fresh provider holding `attributes`, with
/// an empty cache.
pub async fn loaded_editor(attributes: AttributeMap) -> (TestEditor, InMemoryIdentityProvider) {
    let provider = InMemoryIdentityProvider::new("ann", attributes);
    let mut editor = editor(&provider, &InMemorySessionCache::new());
    editor.load().await.expect("load from provider");
    (editor, provider)
}
