//! Change tracking between the saved attributes and the draft.
//!
//! Draft is the authority for key enumeration: a key that exists only in
//! the baseline is never reported. Values are compared exactly, so an
//! undefined value and an empty string are different, and whitespace is
//! significant.
//!
//! ```rust
//! use profile_form::AttributeMap;
//! use profile_form::changes::{changed_fields, is_dirty};
//!
//! let mut baseline = AttributeMap::new();
//! baseline.set("custom:firstName", "Ann");
//! let mut draft = baseline.clone();
//! draft.set("custom:firstName", "Anna");
//!
//! let changes = changed_fields(&baseline, &draft);
//! assert_eq!(changes.get("custom:firstName"), Some(Some("Anna")));
//! assert!(is_dirty(Some(&baseline), &draft));
//! ```

use crate::attributes::AttributeMap;
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The subset of draft attributes that differ from the baseline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSet(BTreeMap<String, Option<String>>);

impl ChangeSet {
    /// Value recorded for `key`: `None` if the key did not change,
    /// `Some(None)` if it changed to undefined.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.0.get(key).map(|v| v.as_deref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Apply the changes on top of `attributes`, as a provider would.
    pub fn apply_to(&self, attributes: &mut AttributeMap) {
        attributes.extend(self.0.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}

impl IntoIterator for ChangeSet {
    type Item = (String, Option<String>);
    type IntoIter = std::collections::btree_map::IntoIter<String, Option<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Compute the draft keys whose values differ from the baseline.
pub fn changed_fields(baseline: &AttributeMap, draft: &AttributeMap) -> ChangeSet {
    let changes: BTreeMap<String, Option<String>> = draft
        .iter()
        .filter(|(key, value)| baseline.get(key) != *value)
        .map(|(key, value)| (key.to_string(), value.map(str::to_string)))
        .collect();

    trace!(
        "Computed {} changed attribute(s) over {} draft key(s)",
        changes.len(),
        draft.len()
    );

    ChangeSet(changes)
}

/// Whether there is anything to submit. Always false before the
/// baseline has been loaded.
pub fn is_dirty(baseline: Option<&AttributeMap>, draft: &AttributeMap) -> bool {
    match baseline {
        Some(baseline) => !changed_fields(baseline, draft).is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, Option<&str>)]) -> AttributeMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
            .collect()
    }

    #[test]
    fn test_identical_maps_have_no_changes() {
        let b = map(&[("email", Some("a@b.com")), ("custom:zipcode", None)]);
        assert!(changed_fields(&b, &b.clone()).is_empty());
        assert!(!is_dirty(Some(&b), &b.clone()));
    }

    #[test]
    fn test_only_differing_draft_keys_reported() {
        let b = map(&[
            ("custom:firstName", Some("Ann")),
            ("email", Some("a@b.com")),
        ]);
        let d = map(&[
            ("custom:firstName", Some("Anna")),
            ("email", Some("a@b.com")),
        ]);

        let changes = changed_fields(&b, &d);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes.get("custom:firstName"), Some(Some("Anna")));
        assert_eq!(changes.get("email"), None);
    }

    #[test]
    fn test_baseline_only_keys_ignored() {
        let b = map(&[
            ("custom:firstName", Some("Ann")),
            ("custom:color", Some("teal")),
        ]);
        let d = map(&[("custom:firstName", Some("Ann"))]);

        assert!(changed_fields(&b, &d).is_empty());
    }

    #[test]
    fn test_new_draft_key_is_a_change() {
        let b = map(&[]);
        let d = map(&[("custom:zipcode", Some("94110"))]);
        assert_eq!(
            changed_fields(&b, &d).get("custom:zipcode"),
            Some(Some("94110"))
        );
    }

    #[test]
    fn test_undefined_and_empty_string_differ() {
        let b = map(&[("custom:zipcode", None)]);
        let d = map(&[("custom:zipcode", Some(""))]);
        assert_eq!(changed_fields(&b, &d).get("custom:zipcode"), Some(Some("")));

        // Undefined in the draft against a missing baseline key is no change.
        let b = map(&[]);
        let d = map(&[("custom:pic", None)]);
        assert!(changed_fields(&b, &d).is_empty());

        // Clearing to undefined is a change.
        let b = map(&[("custom:pic", Some("p.png"))]);
        let d = map(&[("custom:pic", None)]);
        assert_eq!(changed_fields(&b, &d).get("custom:pic"), Some(None));
    }

    #[test]
    fn test_no_trimming() {
        let b = map(&[("custom:lastName", Some("Lee"))]);
        let d = map(&[("custom:lastName", Some("Lee "))]);
        assert!(is_dirty(Some(&b), &d));
    }

    #[test]
    fn test_not_dirty_before_load() {
        let d = map(&[("custom:firstName", Some("Anna"))]);
        assert!(!is_dirty(None, &d));
    }

    #[test]
    fn test_apply_to() {
        let b = map(&[
            ("custom:firstName", Some("Ann")),
            ("email", Some("a@b.com")),
        ]);
        let d = map(&[
            ("custom:firstName", Some("Anna")),
            ("email", Some("a@b.com")),
        ]);

        let mut stored = b.clone();
        changed_fields(&b, &d).apply_to(&mut stored);
        assert_eq!(stored, d);
    }
}
