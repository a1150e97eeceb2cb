//! Typed read-only view over an attribute map.

use super::{AttributeMap, ChildGender, ParentType, keys};
use chrono::NaiveDate;

/// Format of the child birthday value written by a date input.
pub const BIRTHDAY_FORMAT: &str = "%Y-%m-%d";

/// Typed view of the well-known profile attributes.
///
/// Values that don't parse (a malformed date, an unknown choice code)
/// come back as `None`. The snapshot never rejects data: the raw map
/// stays the source of truth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileSnapshot {
    pub email: Option<String>,
    pub subject_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub zip_code: Option<String>,
    pub child_birthday: Option<NaiveDate>,
    pub parent_type: Option<ParentType>,
    pub child_gender: Option<ChildGender>,
    pub picture: Option<String>,
    pub color_preference: Option<String>,
}

impl ProfileSnapshot {
    pub fn from_attributes(attributes: &AttributeMap) -> Self {
        let text = |key: &str| attributes.get(key).map(str::to_string);

        Self {
            email: text(keys::EMAIL),
            subject_id: text(keys::SUBJECT),
            first_name: text(keys::FIRST_NAME),
            last_name: text(keys::LAST_NAME),
            zip_code: text(keys::ZIP_CODE),
            child_birthday: attributes
                .get(keys::CHILD_BIRTHDAY)
                .and_then(|v| NaiveDate::parse_from_str(v, BIRTHDAY_FORMAT).ok()),
            parent_type: attributes
                .get(keys::PARENT_TYPE)
                .and_then(|v| v.parse().ok()),
            child_gender: attributes
                .get(keys::CHILD_GENDER)
                .and_then(|v| v.parse().ok()),
            picture: text(keys::PICTURE),
            color_preference: text(keys::COLOR),
        }
    }

    /// "First Last", skipping whichever part is missing or blank.
    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|p| !p.trim().is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}
