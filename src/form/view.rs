//! Framework-agnostic view model for the profile form.
//!
//! A UI layer renders these descriptors and routes user input back into
//! [`ProfileForm::set_field`]; nothing here depends on a toolkit.

use super::ProfileForm;
use crate::attributes::{AttributeMap, FieldKind, ProfileField, keys};
use std::fmt;

/// One selectable option of a choice field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub code: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Everything needed to render one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: ProfileField,
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Value to show in the control.
    pub value: Option<String>,
    /// Display-only "required" marker.
    pub required_hint: bool,
    /// Options for choice fields, empty otherwise.
    pub options: Vec<ChoiceOption>,
}

/// Inline status alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusAlert {
    Error(String),
    Success(String),
}

impl StatusAlert {
    pub fn is_error(&self) -> bool {
        matches!(self, StatusAlert::Error(_))
    }
}

impl fmt::Display for StatusAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusAlert::Error(message) => write!(f, "{message} Please try again."),
            StatusAlert::Success(message) => write!(f, "Success! {message}"),
        }
    }
}

/// Props handed to the profile picture sub-component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureProps {
    pub color_preference: Option<String>,
    /// The saved user record.
    pub user_record: AttributeMap,
    /// The picture reference being edited.
    pub picture: Option<String>,
    pub subject_id: Option<String>,
}

/// Header block above the fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileHeader {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub change_password_path: String,
}

impl ProfileForm {
    /// Descriptors for every editable field, in display order.
    /// Empty until the attributes are loaded.
    pub fn fields(&self) -> Vec<FieldView> {
        if !self.is_loaded() {
            return Vec::new();
        }
        ProfileField::ALL
            .into_iter()
            .map(|field| self.field_view(field))
            .collect()
    }

    /// Descriptor for a single field.
    pub fn field_view(&self, field: ProfileField) -> FieldView {
        let value = match field.kind() {
            FieldKind::Choice => self.choice_value(field.key()),
            _ => self.draft().get(field.key()),
        };

        let options = field
            .options()
            .iter()
            .map(|&(code, label)| ChoiceOption {
                code,
                label,
                selected: value == Some(code),
            })
            .collect();

        FieldView {
            field,
            key: field.key(),
            label: field.label(),
            kind: field.kind(),
            value: value.map(str::to_string),
            required_hint: field.required_hint(),
            options,
        }
    }

    /// Alerts to show, error first.
    pub fn alerts(&self) -> Vec<StatusAlert> {
        let mut alerts = Vec::new();
        if let Some(error) = self.error() {
            alerts.push(StatusAlert::Error(error.to_string()));
        }
        if let Some(confirmation) = self.confirmation() {
            alerts.push(StatusAlert::Success(confirmation.to_string()));
        }
        alerts
    }

    /// Props for the picture sub-component, `None` until loaded.
    pub fn picture_props(&self) -> Option<PictureProps> {
        let baseline = self.baseline()?;
        Some(PictureProps {
            color_preference: baseline.get(keys::COLOR).map(str::to_string),
            user_record: baseline.clone(),
            picture: self.draft().get(keys::PICTURE).map(str::to_string),
            subject_id: baseline.get(keys::SUBJECT).map(str::to_string),
        })
    }

    /// Header details, `None` until loaded.
    pub fn header(&self) -> Option<ProfileHeader> {
        let snapshot = self.baseline()?.snapshot();
        Some(ProfileHeader {
            email: snapshot.email.clone(),
            display_name: snapshot.display_name(),
            change_password_path: self.config().change_password_path.clone(),
        })
    }
}
