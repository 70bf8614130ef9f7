//! Contact form value set and validation outcome.
//!
//! # Responsibility
//! - Name the fixed set of contact form fields.
//! - Carry field values and per-field error messages as plain data.
//!
//! # Invariants
//! - Fields are validated independently; there are no cross-field rules.
//! - `ValidationOutcome::ok` is true iff `errors` is empty.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// One named input of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Name,
    Email,
    /// Optional field; an empty value is valid.
    Phone,
    Message,
}

impl FieldName {
    /// All fields in form order.
    pub const ALL: [FieldName; 4] = [
        FieldName::Name,
        FieldName::Email,
        FieldName::Phone,
        FieldName::Message,
    ];

    /// Stable lowercase name matching the form control `name` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Message => "message",
        }
    }
}

impl Display for FieldName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current contact form values as read from the page.
///
/// An absent optional field is represented by an empty string, matching how
/// form controls report their value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactForm {
    /// Returns the raw value for one field.
    pub fn value(&self, field: FieldName) -> &str {
        match field {
            FieldName::Name => &self.name,
            FieldName::Email => &self.email,
            FieldName::Phone => &self.phone,
            FieldName::Message => &self.message,
        }
    }
}

/// Result of a whole-form validation pass.
///
/// `errors` holds exactly the failed fields with their user-facing messages;
/// it is discarded once the user corrects the input or the form submits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub ok: bool,
    pub errors: BTreeMap<FieldName, String>,
}

impl ValidationOutcome {
    /// Builds an outcome from collected per-field errors.
    pub fn from_errors(errors: BTreeMap<FieldName, String>) -> Self {
        Self {
            ok: errors.is_empty(),
            errors,
        }
    }

    /// Returns the error message for one field, when present.
    pub fn error_for(&self, field: FieldName) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }
}
