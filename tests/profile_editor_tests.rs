//! End-to-end tests for loading, editing and submitting a profile through
//! `ProfileEditor` with the in-memory collaborators.

mod common;

use common::fixtures::{self, CACHED_EMAIL_ONLY, USER_DATA_KEY};
use profile_form::attributes::{CachedUserData, keys};
use profile_form::cache::{InMemorySessionCache, SessionCache};
use profile_form::provider::{InMemoryIdentityProvider, ProviderError};
use profile_form::{
    ChildGender, LoadSource, LoadState, ProfileError, ProfileField, ProfileFormConfig,
    StatusAlert, SubmitState,
};

#[tokio::test]
async fn test_first_name_edit_and_save() {
    let (mut editor, provider) = common::loaded_editor(fixtures::ann()).await;

    editor.form_mut().set_field(keys::FIRST_NAME, "Anna");
    assert!(editor.form().is_dirty());
    let changes = editor.form().changes();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes.get(keys::FIRST_NAME), Some(Some("Anna")));

    editor.submit().await.unwrap();

    let form = editor.form();
    assert_eq!(form.baseline().unwrap().get(keys::FIRST_NAME), Some("Anna"));
    assert!(!form.is_dirty());
    assert_eq!(form.submit_state(), SubmitState::Succeeded);
    assert_eq!(
        form.alerts(),
        vec![StatusAlert::Success(
            "Your profile information has been successfully saved.".to_string()
        )]
    );
    assert_eq!(provider.updates().await, vec![changes]);
}

#[tokio::test]
async fn test_cache_hit_makes_no_provider_call() {
    let provider = InMemoryIdentityProvider::new("ann", fixtures::full_profile());
    let cache = fixtures::cache_with_user_data(CACHED_EMAIL_ONLY);
    let mut editor = common::editor(&provider, &cache);

    editor.load().await.unwrap();

    let form = editor.form();
    assert_eq!(form.load_state(), &LoadState::Loaded(LoadSource::Cache));
    assert_eq!(form.baseline().unwrap().len(), 1);
    assert_eq!(form.baseline().unwrap().get(keys::EMAIL), Some("a@b.com"));
    assert_eq!(form.draft(), form.baseline().unwrap());
    assert_eq!(provider.call_counts().user_info, 0);
}

#[tokio::test]
async fn test_choice_field_falls_back_to_baseline() {
    let (mut editor, _provider) = common::loaded_editor(fixtures::full_profile()).await;

    editor.form_mut().clear_field(keys::CHILD_GENDER);
    let view = editor.form().field_view(ProfileField::ChildGender);
    assert_eq!(view.value.as_deref(), Some("M"));

    editor.form_mut().set_child_gender(ChildGender::Surprise);
    let view = editor.form().field_view(ProfileField::ChildGender);
    assert_eq!(view.value.as_deref(), Some("S"));
}

#[tokio::test]
async fn test_update_failure_preserves_edits_for_retry() {
    let (mut editor, provider) = common::loaded_editor(fixtures::full_profile()).await;
    editor.form_mut().set_field(keys::ZIP_CODE, "10001");
    let baseline = editor.form().baseline().cloned();
    let changes = editor.form().changes();

    provider.fail_next_update(ProviderError::LimitExceeded).await;
    let err = editor.submit().await.unwrap_err();
    assert!(matches!(err, ProfileError::UpdateFailure { .. }));

    let form = editor.form();
    assert_eq!(form.baseline().cloned(), baseline);
    assert_eq!(form.changes(), changes);
    assert_eq!(form.submit_state(), SubmitState::Failed);
    assert_eq!(
        form.alerts()[0].to_string(),
        "Attempt limit exceeded, please try after some time Please try again."
    );
    assert!(form.can_submit());

    // Explicit resubmission succeeds and sends the same change set.
    editor.submit().await.unwrap();
    assert_eq!(editor.form().error(), None);
    assert_eq!(provider.updates().await, vec![changes]);
    assert_eq!(provider.call_counts().update, 2);
}

#[tokio::test]
async fn test_session_failure_skips_update() {
    let (mut editor, provider) = common::loaded_editor(fixtures::ann()).await;
    editor.form_mut().set_field(keys::LAST_NAME, "Lee");

    provider.sign_out().await;
    let err = editor.submit().await.unwrap_err();

    assert!(matches!(err, ProfileError::SessionFailure { .. }));
    assert_eq!(editor.form().error(), Some("The user is not authenticated"));
    assert_eq!(provider.call_counts().update, 0);
    assert!(editor.form().is_dirty());
}

#[tokio::test]
async fn test_editing_clears_error() {
    let (mut editor, provider) = common::loaded_editor(fixtures::ann()).await;
    editor.form_mut().set_field(keys::FIRST_NAME, "Anna");
    provider
        .fail_next_session(ProviderError::network("connection reset"))
        .await;
    let _ = editor.submit().await;
    assert!(editor.form().error().is_some());

    editor.form_mut().set_field(keys::FIRST_NAME, "Annie");
    assert_eq!(editor.form().error(), None);
}

#[tokio::test]
async fn test_submit_without_changes_is_refused() {
    let (mut editor, provider) = common::loaded_editor(fixtures::ann()).await;

    let err = editor.submit().await.unwrap_err();
    assert!(matches!(err, ProfileError::NothingToSubmit));
    assert_eq!(editor.form().submit_state(), SubmitState::Idle);
    assert_eq!(provider.call_counts().session, 0);
}

#[tokio::test]
async fn test_load_failure_then_reload() {
    let provider = InMemoryIdentityProvider::new("ann", fixtures::ann());
    provider
        .fail_next_user_info(ProviderError::network("offline"))
        .await;
    let mut editor = common::editor(&provider, &InMemorySessionCache::new());

    let err = editor.load().await.unwrap_err();
    assert!(matches!(err, ProfileError::LoadFailure { .. }));
    assert_eq!(
        editor.form().load_state(),
        &LoadState::Failed("Network error: offline".to_string())
    );
    assert!(editor.form().fields().is_empty());
    assert!(matches!(
        editor.submit().await,
        Err(ProfileError::NotLoaded)
    ));

    editor.reload().await.unwrap();
    assert_eq!(
        editor.form().load_state(),
        &LoadState::Loaded(LoadSource::Provider)
    );
    assert_eq!(editor.form().fields().len(), ProfileField::ALL.len());

    // Reloading a loaded form keeps the edits.
    editor.form_mut().set_field(keys::ZIP_CODE, "94110");
    editor.reload().await.unwrap();
    assert!(editor.form().is_dirty());
    assert_eq!(provider.call_counts().user_info, 2);
}

#[tokio::test]
async fn test_second_load_keeps_edits() {
    let (mut editor, provider) = common::loaded_editor(fixtures::ann()).await;
    editor.form_mut().set_field(keys::FIRST_NAME, "Anna");

    editor.load().await.unwrap();

    assert_eq!(editor.form().draft().get(keys::FIRST_NAME), Some("Anna"));
    assert!(editor.form().is_dirty());
    assert_eq!(provider.call_counts().user_info, 1);
}

#[tokio::test]
async fn test_successful_save_refreshes_cache() {
    let provider = InMemoryIdentityProvider::new("ann", fixtures::full_profile());
    let cache = fixtures::cache_with_user_data(CACHED_EMAIL_ONLY);
    let mut editor = common::editor(&provider, &cache);
    editor.load().await.unwrap();

    editor.form_mut().set_field(keys::FIRST_NAME, "Anna");
    editor.submit().await.unwrap();

    let raw = cache.get(USER_DATA_KEY).await.unwrap().unwrap();
    let cached = CachedUserData::from_json(&raw).unwrap().to_attribute_map();
    assert_eq!(cached.get(keys::FIRST_NAME), Some("Anna"));
    assert_eq!(cached.get(keys::EMAIL), Some("a@b.com"));

    // A fresh form sees the saved values without asking the provider.
    let mut next = common::editor(&provider, &cache);
    next.load().await.unwrap();
    assert_eq!(next.form().baseline(), editor.form().baseline());
    assert_eq!(provider.call_counts().user_info, 0);
}

#[tokio::test]
async fn test_cache_write_failure_does_not_fail_submit() {
    let provider = InMemoryIdentityProvider::new("ann", fixtures::ann());
    let cache = InMemorySessionCache::new();
    let mut editor = common::editor(&provider, &cache);
    editor.load().await.unwrap();

    cache.set_unavailable(true);
    editor.form_mut().set_field(keys::FIRST_NAME, "Anna");
    editor.submit().await.unwrap();

    assert_eq!(editor.form().submit_state(), SubmitState::Succeeded);
    assert_eq!(
        provider.attributes().await.get(keys::FIRST_NAME),
        Some("Anna")
    );
}

#[tokio::test]
async fn test_write_back_can_be_disabled() {
    let provider = InMemoryIdentityProvider::new("ann", fixtures::ann());
    let cache = fixtures::cache_with_user_data(CACHED_EMAIL_ONLY);
    let mut editor = profile_form::ProfileEditor::new(
        provider.clone(),
        cache.clone(),
        ProfileFormConfig::default().with_write_back_cache(false),
    );
    editor.load().await.unwrap();

    editor.form_mut().set_field(keys::FIRST_NAME, "Anna");
    editor.submit().await.unwrap();

    assert_eq!(
        cache.get(USER_DATA_KEY).await.unwrap().as_deref(),
        Some(CACHED_EMAIL_ONLY)
    );
}

#[tokio::test]
async fn test_rejected_attribute_is_atomic() {
    let (mut editor, provider) = common::loaded_editor(fixtures::full_profile()).await;
    editor.form_mut().set_field(keys::FIRST_NAME, "Anna");
    editor.form_mut().set_field(keys::SUBJECT, "forged");

    let err = editor.submit().await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid attribute 'sub': attribute cannot be modified"
    );
    assert_eq!(provider.attributes().await, fixtures::full_profile());
    assert_eq!(editor.form().changes().len(), 2);
}

#[tokio::test]
async fn test_header_and_picture_props() {
    let (mut editor, _provider) = common::loaded_editor(fixtures::full_profile()).await;
    editor.form_mut().set_field(keys::PICTURE, "avatars/ann.png");

    let header = editor.form().header().unwrap();
    assert_eq!(header.email.as_deref(), Some("ann@example.com"));
    assert_eq!(header.display_name.as_deref(), Some("Ann Lee"));
    assert_eq!(header.change_password_path, "/change-password");

    let props = editor.form().picture_props().unwrap();
    assert_eq!(props.color_preference.as_deref(), Some("teal"));
    assert_eq!(props.picture.as_deref(), Some("avatars/ann.png"));
    assert_eq!(
        props.subject_id.as_deref(),
        Some("6f1c2e0a-7d3b-4c59-9a1e-2b8f0c4d5e6f")
    );
}

#[test]
fn test_blocking_round_trip() {
    tokio_test::block_on(async {
        let (mut editor, provider) = common::loaded_editor(fixtures::ann()).await;
        editor.form_mut().set_field(keys::ZIP_CODE, "94110");
        editor.submit().await.unwrap();
        assert_eq!(
            provider.attributes().await.get(keys::ZIP_CODE),
            Some("94110")
        );
    });
}
