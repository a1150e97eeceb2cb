//! User attribute mappings.
//!
//! An [`AttributeMap`] is the flat key/value view of a user record as the
//! identity provider stores it. Keys are either standard (`email`, `sub`)
//! or live in the `custom:` namespace (see [`keys`]). Values are optional:
//! a key that is absent and a key explicitly mapped to `None` both read as
//! undefined, while `Some("")` is a distinct, defined empty value.
//!
//! ```rust
//! use profile_form::attributes::{AttributeMap, keys};
//!
//! let mut attrs = AttributeMap::new();
//! attrs.set(keys::FIRST_NAME, "Ann");
//! assert_eq!(attrs.get(keys::FIRST_NAME), Some("Ann"));
//! assert_eq!(attrs.get(keys::LAST_NAME), None);
//! ```

pub mod fields;
pub mod raw;
pub mod snapshot;

pub use fields::{ChildGender, FieldKind, ParentType, ProfileField};
pub use raw::{CachedUserData, RawAttribute};
pub use snapshot::ProfileSnapshot;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Well-known attribute keys.
pub mod keys {
    pub const EMAIL: &str = "email";
    pub const SUBJECT: &str = "sub";
    pub const FIRST_NAME: &str = "custom:firstName";
    pub const LAST_NAME: &str = "custom:lastName";
    pub const ZIP_CODE: &str = "custom:zipcode";
    pub const CHILD_BIRTHDAY: &str = "custom:childBirthday";
    pub const PARENT_TYPE: &str = "custom:parentType";
    pub const CHILD_GENDER: &str = "custom:childGender";
    pub const PICTURE: &str = "custom:pic";
    pub const COLOR: &str = "custom:color";

    /// Namespace prefix for application-defined attributes.
    pub const CUSTOM_PREFIX: &str = "custom:";
}

/// Flat mapping from attribute key to optional attribute value.
///
/// Iteration order is the lexical order of the keys, which keeps change
/// sets and serialized output deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeMap(BTreeMap<String, Option<String>>);

impl AttributeMap {
    /// Create an empty attribute map.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Read a value. Absent keys and `None` values both yield `None`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_deref())
    }

    /// Set a defined value, replacing any previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), Some(value.into()));
    }

    /// Set a value that may be undefined. The key is kept even for `None`.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) -> Option<String> {
        self.0.insert(key.into(), value).flatten()
    }

    /// Whether the key is present, regardless of its value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterate keys in lexical order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterate `(key, value)` pairs in lexical key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Iterate only the `custom:` namespaced pairs.
    pub fn custom(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.iter()
            .filter(|(k, _)| k.starts_with(keys::CUSTOM_PREFIX))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Typed read-only view of the well-known profile attributes.
    pub fn snapshot(&self) -> ProfileSnapshot {
        ProfileSnapshot::from_attributes(self)
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeMap
where
    K: Into<String>,
    V: Into<Option<String>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K, V> Extend<(K, V)> for AttributeMap
where
    K: Into<String>,
    V: Into<Option<String>>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.0.insert(k.into(), v.into());
        }
    }
}

impl From<BTreeMap<String, Option<String>>> for AttributeMap {
    fn from(map: BTreeMap<String, Option<String>>) -> Self {
        Self(map)
    }
}

impl fmt::Display for AttributeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match v {
                Some(v) => write!(f, "{k}: {v:?}")?,
                None => write!(f, "{k}: undefined")?,
            }
        }
        write!(f, "}}")
    }
}
