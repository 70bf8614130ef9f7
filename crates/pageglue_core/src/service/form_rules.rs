//! Contact form validation rules and inline error display.
//!
//! # Responsibility
//! - Validate the fixed field set with independent, per-field rules.
//! - Read values from and display error annotations on the page surface.
//!
//! # Invariants
//! - Fields never short-circuit each other; a pass reports every failure.
//! - Validation errors are data, never `Err`; they are translated directly
//!   into UI annotations.
//! - Editing a field clears only its own annotation, without re-validating.

use crate::host::surface::{AnnotationNode, PageSurface, SurfaceResult};
use crate::model::form::{ContactForm, FieldName, ValidationOutcome};
use crate::model::page::FormBinding;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Class applied to a failing form control.
pub const FIELD_ERROR_CLASS: &str = "error";
/// Class of the message node appended below a failing control.
pub const FIELD_ERROR_NODE_CLASS: &str = "field-error";

pub const NAME_ERROR: &str = "Please enter your full name (at least 2 characters)";
pub const EMAIL_ERROR: &str = "Please enter a valid email address";
pub const PHONE_ERROR: &str = "Please enter a valid phone number";
pub const MESSAGE_ERROR: &str = "Please enter a message (at least 10 characters)";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("valid phone regex"));
static PHONE_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\-\(\)\.]").expect("valid phone separator regex"));

/// Minimal syntactic email check; deliberately not RFC-complete.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Strips spaces, hyphens, parentheses, and dots from a phone value.
pub fn clean_phone(phone: &str) -> String {
    PHONE_SEPARATOR_RE.replace_all(phone, "").into_owned()
}

/// A non-empty phone is valid when its cleaned form is an optional leading
/// `+`, a non-zero first digit, up to 15 more digits, and at least 10
/// characters long.
pub fn is_valid_phone(phone: &str) -> bool {
    let cleaned = clean_phone(phone);
    PHONE_RE.is_match(&cleaned) && cleaned.len() >= 10
}

/// Validates one field value, as run on blur.
///
/// Returns the user-facing message when the value fails, `None` when it
/// passes. An empty phone passes; the field is optional.
pub fn validate_field(field: FieldName, value: &str) -> Option<&'static str> {
    let trimmed = value.trim();
    match field {
        FieldName::Name => (trimmed.chars().count() < 2).then_some(NAME_ERROR),
        FieldName::Email => (!is_valid_email(trimmed)).then_some(EMAIL_ERROR),
        FieldName::Phone => {
            (!trimmed.is_empty() && !is_valid_phone(trimmed)).then_some(PHONE_ERROR)
        }
        FieldName::Message => (trimmed.chars().count() < 10).then_some(MESSAGE_ERROR),
    }
}

/// Validates the whole form; every field is checked independently.
pub fn validate_form(form: &ContactForm) -> ValidationOutcome {
    let mut errors = BTreeMap::new();
    for field in FieldName::ALL {
        if let Some(message) = validate_field(field, form.value(field)) {
            errors.insert(field, message.to_string());
        }
    }
    ValidationOutcome::from_errors(errors)
}

/// Contact form facade over the page surface: value reads, error display,
/// and field reset.
#[derive(Debug, Clone)]
pub struct ContactFormPanel {
    binding: FormBinding,
}

impl ContactFormPanel {
    pub fn new(binding: FormBinding) -> Self {
        Self { binding }
    }

    pub fn binding(&self) -> &FormBinding {
        &self.binding
    }

    /// Resolves a field to its bound input element id.
    pub fn field_element(&self, field: FieldName) -> Option<&str> {
        self.binding.field_element(field)
    }

    /// Reads current field values off the surface.
    pub fn read_form<S: PageSurface>(&self, surface: &S) -> SurfaceResult<ContactForm> {
        let mut form = ContactForm::default();
        for field in FieldName::ALL {
            let Some(element) = self.binding.field_element(field) else {
                continue;
            };
            let value = surface.value(element)?;
            match field {
                FieldName::Name => form.name = value,
                FieldName::Email => form.email = value,
                FieldName::Phone => form.phone = value,
                FieldName::Message => form.message = value,
            }
        }
        Ok(form)
    }

    /// Shows or clears the inline annotation for one field.
    pub fn display_field_error<S: PageSurface>(
        &self,
        surface: &mut S,
        field: FieldName,
        error: Option<&str>,
    ) -> SurfaceResult<()> {
        let Some(element) = self.binding.field_element(field) else {
            return Ok(());
        };
        let element = element.to_string();
        self.clear_field_error(surface, field)?;
        if let Some(message) = error {
            surface.add_class(&element, FIELD_ERROR_CLASS)?;
            surface.append_annotation(
                &element,
                AnnotationNode::new(
                    error_annotation_id(&element),
                    FIELD_ERROR_NODE_CLASS,
                    message,
                ),
            )?;
        }
        Ok(())
    }

    /// Clears the annotation for one field; editing triggers this directly.
    pub fn clear_field_error<S: PageSurface>(
        &self,
        surface: &mut S,
        field: FieldName,
    ) -> SurfaceResult<()> {
        let Some(element) = self.binding.field_element(field) else {
            return Ok(());
        };
        let element = element.to_string();
        surface.remove_class(&element, FIELD_ERROR_CLASS)?;
        let annotation = error_annotation_id(&element);
        let present = surface
            .annotations(&element)?
            .iter()
            .any(|node| node.id == annotation);
        if present {
            surface.remove_annotation(&element, &annotation)?;
        }
        Ok(())
    }

    /// Clears every field annotation.
    pub fn clear_all_errors<S: PageSurface>(&self, surface: &mut S) -> SurfaceResult<()> {
        for field in FieldName::ALL {
            self.clear_field_error(surface, field)?;
        }
        Ok(())
    }

    /// Translates a validation outcome into inline annotations, clearing
    /// stale ones first.
    pub fn apply_outcome<S: PageSurface>(
        &self,
        surface: &mut S,
        outcome: &ValidationOutcome,
    ) -> SurfaceResult<()> {
        self.clear_all_errors(surface)?;
        for (field, message) in &outcome.errors {
            self.display_field_error(surface, *field, Some(message))?;
        }
        Ok(())
    }

    /// Blanks every bound field value.
    pub fn reset_fields<S: PageSurface>(&self, surface: &mut S) -> SurfaceResult<()> {
        for field in FieldName::ALL {
            if let Some(element) = self.binding.field_element(field) {
                let element = element.to_string();
                surface.set_value(&element, "")?;
            }
        }
        Ok(())
    }
}

fn error_annotation_id(element: &str) -> String {
    format!("{element}-error")
}

#[cfg(test)]
mod tests {
    use super::{
        clean_phone, is_valid_email, is_valid_phone, validate_field, validate_form,
        ContactFormPanel, EMAIL_ERROR, FIELD_ERROR_CLASS, MESSAGE_ERROR, NAME_ERROR, PHONE_ERROR,
    };
    use crate::host::surface::{MemoryPage, PageSurface};
    use crate::model::form::{ContactForm, FieldName};
    use crate::model::page::FormBinding;
    use std::collections::BTreeMap;

    fn panel() -> ContactFormPanel {
        let mut fields = BTreeMap::new();
        fields.insert(FieldName::Name, "input-name".to_string());
        fields.insert(FieldName::Email, "input-email".to_string());
        fields.insert(FieldName::Phone, "input-phone".to_string());
        fields.insert(FieldName::Message, "input-message".to_string());
        ContactFormPanel::new(FormBinding {
            form_id: "contact-form".to_string(),
            submit_button_id: "contact-submit".to_string(),
            fields,
        })
    }

    fn page() -> MemoryPage {
        MemoryPage::new()
            .with_element("contact-form")
            .with_element("contact-submit")
            .with_element("input-name")
            .with_element("input-email")
            .with_element("input-phone")
            .with_element("input-message")
    }

    #[test]
    fn email_rule_requires_one_at_and_dotted_domain() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@b."));
    }

    #[test]
    fn phone_rule_cleans_separators_and_checks_shape() {
        assert_eq!(clean_phone("555-123-4567"), "5551234567");
        assert!(is_valid_phone("555-123-4567"));
        assert!(is_valid_phone("+1 (555) 123.4567"));
        assert!(!is_valid_phone("123"));
        assert!(!is_valid_phone("0551234567"));
        assert!(!is_valid_phone("555-123-456x"));
    }

    #[test]
    fn field_rules_match_contract() {
        assert_eq!(validate_field(FieldName::Name, "  A "), Some(NAME_ERROR));
        assert_eq!(validate_field(FieldName::Name, " Al "), None);
        assert_eq!(validate_field(FieldName::Email, "x"), Some(EMAIL_ERROR));
        assert_eq!(validate_field(FieldName::Phone, ""), None);
        assert_eq!(validate_field(FieldName::Phone, "123"), Some(PHONE_ERROR));
        assert_eq!(
            validate_field(FieldName::Message, "too short"),
            Some(MESSAGE_ERROR)
        );
        assert_eq!(validate_field(FieldName::Message, "long enough text"), None);
    }

    #[test]
    fn whole_form_reports_exactly_the_failed_fields() {
        let outcome = validate_form(&ContactForm {
            name: String::new(),
            email: "x".to_string(),
            phone: String::new(),
            message: "hi".to_string(),
        });
        assert!(!outcome.ok);
        let failed: Vec<_> = outcome.errors.keys().copied().collect();
        assert_eq!(
            failed,
            vec![FieldName::Name, FieldName::Email, FieldName::Message]
        );
        assert_eq!(outcome.error_for(FieldName::Name), Some(NAME_ERROR));
    }

    #[test]
    fn display_and_clear_round_trip_annotations() {
        let panel = panel();
        let mut page = page();

        panel
            .display_field_error(&mut page, FieldName::Email, Some(EMAIL_ERROR))
            .unwrap();
        assert!(page.has_class("input-email", FIELD_ERROR_CLASS).unwrap());
        let annotations = page.annotations("input-email").unwrap();
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].text, EMAIL_ERROR);

        // Re-displaying replaces, never stacks.
        panel
            .display_field_error(&mut page, FieldName::Email, Some(EMAIL_ERROR))
            .unwrap();
        assert_eq!(page.annotations("input-email").unwrap().len(), 1);

        panel.clear_field_error(&mut page, FieldName::Email).unwrap();
        assert!(!page.has_class("input-email", FIELD_ERROR_CLASS).unwrap());
        assert!(page.annotations("input-email").unwrap().is_empty());
        // Clearing an already-clean field is a no-op.
        panel.clear_field_error(&mut page, FieldName::Email).unwrap();
    }

    #[test]
    fn read_and_reset_cover_all_bound_fields() {
        let panel = panel();
        let mut page = page();
        page.set_value("input-name", "Ada Lovelace").unwrap();
        page.set_value("input-message", "I want to see the house").unwrap();

        let form = panel.read_form(&page).unwrap();
        assert_eq!(form.name, "Ada Lovelace");
        assert_eq!(form.phone, "");

        panel.reset_fields(&mut page).unwrap();
        assert_eq!(page.value("input-name").unwrap(), "");
        assert_eq!(page.value("input-message").unwrap(), "");
    }
}
