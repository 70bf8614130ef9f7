use pageglue_core::{is_valid_email, is_valid_phone, validate_field, validate_form, ContactForm, FieldName};

#[test]
fn name_rule_uses_trimmed_length() {
    assert_eq!(validate_field(FieldName::Name, "Jo"), None);
    assert_eq!(validate_field(FieldName::Name, "  Jo  "), None);
    assert!(validate_field(FieldName::Name, "J").is_some());
    assert!(validate_field(FieldName::Name, "").is_some());
    assert!(validate_field(FieldName::Name, "   ").is_some());
}

#[test]
fn email_rule_examples_from_contract() {
    assert!(is_valid_email("a@b.com"));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("a b@c.com"));
    assert!(!is_valid_email("a@b@c.com"));
    assert!(!is_valid_email("plainaddress"));
}

#[test]
fn phone_rule_examples_from_contract() {
    // Cleans to 5551234567: ten digits, no leading zero.
    assert!(is_valid_phone("555-123-4567"));
    assert!(!is_valid_phone("123"));
    // Empty phone is handled at the field level, where it is optional.
    assert_eq!(validate_field(FieldName::Phone, ""), None);
    assert_eq!(validate_field(FieldName::Phone, "   "), None);
    // 17 digits after the optional plus is too long for the pattern.
    assert!(!is_valid_phone("+12345678901234567"));
}

#[test]
fn message_rule_uses_trimmed_length() {
    assert!(validate_field(FieldName::Message, "hi").is_some());
    assert!(validate_field(FieldName::Message, "123456789 ").is_some());
    assert_eq!(validate_field(FieldName::Message, "exactly10!"), None);
}

#[test]
fn whole_form_reports_failed_fields_without_short_circuit() {
    let outcome = validate_form(&ContactForm {
        name: String::new(),
        email: "x".to_string(),
        phone: String::new(),
        message: "hi".to_string(),
    });

    assert!(!outcome.ok);
    assert_eq!(outcome.errors.len(), 3);
    assert!(outcome.error_for(FieldName::Name).is_some());
    assert!(outcome.error_for(FieldName::Email).is_some());
    assert!(outcome.error_for(FieldName::Message).is_some());
    assert!(outcome.error_for(FieldName::Phone).is_none());
}

#[test]
fn fully_valid_form_passes() {
    let outcome = validate_form(&ContactForm {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: "+1 (555) 123-4567".to_string(),
        message: "I would like to schedule a viewing.".to_string(),
    });
    assert!(outcome.ok);
    assert!(outcome.errors.is_empty());
}

#[test]
fn outcome_serializes_with_snake_case_fields() {
    let outcome = validate_form(&ContactForm {
        name: "A".to_string(),
        email: "ada@example.com".to_string(),
        phone: String::new(),
        message: "long enough message".to_string(),
    });
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["ok"], false);
    assert!(json["errors"]["name"].is_string());
}
