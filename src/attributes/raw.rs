//! Raw attribute list as stored in the session cache.
//!
//! The cache holds the provider's `GetUser`-style payload verbatim:
//!
//! ```json
//! {"UserAttributes": [{"Name": "email", "Value": "a@b.com"}]}
//! ```
//!
//! Any other top-level fields of the payload are ignored.

use super::AttributeMap;
use crate::error::ProfileResult;
use serde::{Deserialize, Serialize};

/// A single `{Name, Value}` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAttribute {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Value", default)]
    pub value: Option<String>,
}

/// The cached user record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedUserData {
    #[serde(rename = "UserAttributes", default)]
    pub user_attributes: Vec<RawAttribute>,
}

impl CachedUserData {
    /// Parse the serialized cache payload.
    pub fn from_json(raw: &str) -> ProfileResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Serialize for writing back into the cache.
    pub fn to_json(&self) -> ProfileResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Flatten the pair list. When a name repeats, the later pair wins.
    pub fn to_attribute_map(&self) -> AttributeMap {
        self.user_attributes
            .iter()
            .map(|attr| (attr.name.clone(), attr.value.clone()))
            .collect()
    }
}

impl From<&AttributeMap> for CachedUserData {
    fn from(attributes: &AttributeMap) -> Self {
        Self {
            user_attributes: attributes
                .iter()
                .map(|(name, value)| RawAttribute {
                    name: name.to_string(),
                    value: value.map(str::to_string),
                })
                .collect(),
        }
    }
}
