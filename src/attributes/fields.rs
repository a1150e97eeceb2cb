//! The fixed set of editable profile fields and their choice codes.

use super::keys;
use crate::error::ProfileError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Kind of input control a field binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Date,
    Choice,
    Picture,
}

/// An editable field of the profile form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    FirstName,
    LastName,
    ChildBirthday,
    ZipCode,
    ParentType,
    ChildGender,
    Picture,
}

impl ProfileField {
    /// All fields, in display order.
    pub const ALL: [ProfileField; 7] = [
        ProfileField::Picture,
        ProfileField::FirstName,
        ProfileField::LastName,
        ProfileField::ChildBirthday,
        ProfileField::ZipCode,
        ProfileField::ParentType,
        ProfileField::ChildGender,
    ];

    /// Attribute key the field reads from and writes to.
    pub fn key(self) -> &'static str {
        match self {
            ProfileField::FirstName => keys::FIRST_NAME,
            ProfileField::LastName => keys::LAST_NAME,
            ProfileField::ChildBirthday => keys::CHILD_BIRTHDAY,
            ProfileField::ZipCode => keys::ZIP_CODE,
            ProfileField::ParentType => keys::PARENT_TYPE,
            ProfileField::ChildGender => keys::CHILD_GENDER,
            ProfileField::Picture => keys::PICTURE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProfileField::FirstName => "First Name",
            ProfileField::LastName => "Last Name",
            ProfileField::ChildBirthday => "Child/ren Birthday",
            ProfileField::ZipCode => "Zip Code",
            ProfileField::ParentType => "I am a...",
            ProfileField::ChildGender => "I am having...",
            ProfileField::Picture => "Profile Picture",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            ProfileField::FirstName | ProfileField::LastName | ProfileField::ZipCode => {
                FieldKind::Text
            }
            ProfileField::ChildBirthday => FieldKind::Date,
            ProfileField::ParentType | ProfileField::ChildGender => FieldKind::Choice,
            ProfileField::Picture => FieldKind::Picture,
        }
    }

    /// Display-only hint; submission is never blocked on it.
    pub fn required_hint(self) -> bool {
        matches!(
            self,
            ProfileField::FirstName
                | ProfileField::LastName
                | ProfileField::ChildBirthday
                | ProfileField::ZipCode
        )
    }

    /// `(code, label)` options for choice fields, empty otherwise.
    pub fn options(self) -> &'static [(&'static str, &'static str)] {
        match self {
            ProfileField::ParentType => ParentType::OPTIONS,
            ProfileField::ChildGender => ChildGender::OPTIONS,
            _ => &[],
        }
    }

    /// Look a field up by its attribute key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Declares a closed set of single-letter choice codes with labels,
/// plus `FromStr`/`Display`/serde through the code.
macro_rules! choice_codes {
    (
        $(#[$meta:meta])*
        $name:ident, $field:expr, {
            $($variant:ident => ($code:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const OPTIONS: &'static [(&'static str, &'static str)] =
                &[$(($code, $label)),+];

            /// Attribute value stored for this choice.
            pub fn code(self) -> &'static str {
                match self {
                    $($name::$variant => $code),+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl FromStr for $name {
            type Err = ProfileError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($code => Ok($name::$variant),)+
                    other => Err(ProfileError::InvalidChoice {
                        field: $field.key().to_string(),
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(self.code())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let value = String::deserialize(deserializer)?;
                value.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

choice_codes!(
    /// "I am a..." choice.
    ParentType, ProfileField::ParentType, {
        New => ("N", "New Parent"),
        Seasoned => ("S", "Seasoned Parent"),
    }
);

choice_codes!(
    /// "I am having..." choice.
    ChildGender, ProfileField::ChildGender, {
        Boy => ("M", "A boy"),
        Girl => ("F", "A girl"),
        Surprise => ("S", "A surprise"),
        Multiple => ("T", "More than one"),
    }
);
