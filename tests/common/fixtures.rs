//! Attribute and cache payload fixtures.

use profile_form::AttributeMap;
use profile_form::attributes::keys;
use profile_form::cache::InMemorySessionCache;

/// Key the pointer entry in [`cache_with_user_data`] points at.
pub const USER_DATA_KEY: &str = "CognitoIdentityServiceProvider.app.ann.userData";

pub const CACHED_EMAIL_ONLY: &str = r#"{"UserAttributes":[{"Name":"email","Value":"a@b.com"}]}"#;

/// A fully populated profile as the provider would return it.
pub fn full_profile() -> AttributeMap {
    let mut attrs = AttributeMap::new();
    attrs.set(keys::SUBJECT, "6f1c2e0a-7d3b-4c59-9a1e-2b8f0c4d5e6f");
    attrs.set(keys::EMAIL, "ann@example.com");
    attrs.set(keys::FIRST_NAME, "Ann");
    attrs.set(keys::LAST_NAME, "Lee");
    attrs.set(keys::CHILD_BIRTHDAY, "2021-03-04");
    attrs.set(keys::ZIP_CODE, "94110");
    attrs.set(keys::PARENT_TYPE, "N");
    attrs.set(keys::CHILD_GENDER, "M");
    attrs.set(keys::COLOR, "teal");
    attrs
}

/// Minimal profile with only a first name.
pub fn ann() -> AttributeMap {
    let mut attrs = AttributeMap::new();
    attrs.set(keys::FIRST_NAME, "Ann");
    attrs
}

/// Cache laid out the way hosted-UI SDKs leave it: a pointer entry under
/// `userDataKey` and the serialized user record under the pointed key.
pub fn cache_with_user_data(payload: &str) -> InMemorySessionCache {
    InMemorySessionCache::with_entries([("userDataKey", USER_DATA_KEY), (USER_DATA_KEY, payload)])
}
