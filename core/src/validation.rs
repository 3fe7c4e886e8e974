//! Company form validation.
//!
//! Pure functions: nothing here fails with Err. Every problem becomes a
//! ValidationError and all of them are collected, never short-circuited,
//! so a form can flag every bad field at once.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

pub const NAME_MAX_LEN:        usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 1000;
pub const ADDRESS_MAX_LEN:     usize = 200;
pub const CATEGORY_MAX_LEN:    usize = 50;

/// The company create/edit form as submitted. Empty strings mean "not provided".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyFormData {
    pub name:          String,
    pub industry:      String,
    pub contact_email: String,
    pub website:       String,
    pub contact_phone: String,
    pub description:   String,
    pub address:       String,
    pub category:      String,
}

impl CompanyFormData {
    /// Fields in form order, keyed by their wire names.
    fn fields(&self) -> [(&'static str, &str); 8] {
        [
            ("name",         self.name.as_str()),
            ("industry",     self.industry.as_str()),
            ("contactEmail", self.contact_email.as_str()),
            ("website",      self.website.as_str()),
            ("contactPhone", self.contact_phone.as_str()),
            ("description",  self.description.as_str()),
            ("address",      self.address.as_str()),
            ("category",     self.category.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationError {
    pub field:   String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self { field: field.to_string(), message: message.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors:   Vec<ValidationError>,
}

impl ValidationResult {
    pub fn error_for(&self, field: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// field -> message, for binding errors next to form inputs.
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        self.errors
            .iter()
            .map(|e| (e.field.clone(), e.message.clone()))
            .collect()
    }
}

fn re_email() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"))
}

fn re_url() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?i)(https?://)?([a-z0-9-]+\.)+[a-z]{2,}(:\d{1,5})?(/\S*)?$")
            .expect("url regex")
    })
}

fn re_phone() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?[1-9]\d{1,14}$").expect("phone regex"))
}

/// Email shape check shared with account creation.
pub fn is_valid_email(value: &str) -> bool {
    re_email().is_match(value.trim())
}

/// Validate the whole form. Field order in `errors` follows form order.
pub fn validate_company_form(data: &CompanyFormData) -> ValidationResult {
    let errors: Vec<ValidationError> = data
        .fields()
        .iter()
        .filter_map(|(field, value)| validate_field(field, value, Some(data)))
        .collect();

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Validate one field by its wire name. Unknown fields always pass.
///
/// `_data` is the rest of the form when the caller has it. Every current
/// rule looks at `value` alone.
pub fn validate_field(
    field: &str,
    value: &str,
    _data: Option<&CompanyFormData>,
) -> Option<ValidationError> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();

    match field {
        "name" => {
            if trimmed.is_empty() {
                Some(ValidationError::new(field, "Company name is required"))
            } else if len > NAME_MAX_LEN {
                Some(ValidationError::new(
                    field,
                    format!("Company name must be {NAME_MAX_LEN} characters or less"),
                ))
            } else {
                None
            }
        }
        "industry" => trimmed
            .is_empty()
            .then(|| ValidationError::new(field, "Industry is required")),
        "contactEmail" => {
            if trimmed.is_empty() {
                Some(ValidationError::new(field, "Contact email is required"))
            } else if !is_valid_email(trimmed) {
                Some(ValidationError::new(field, "Please enter a valid email address"))
            } else {
                None
            }
        }
        // Optional fields: empty means "not provided" and passes.
        _ if trimmed.is_empty() => None,
        "website" => (!re_url().is_match(trimmed))
            .then(|| ValidationError::new(field, "Please enter a valid website URL")),
        "contactPhone" => {
            let digits: String = trimmed
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '+')
                .collect();
            (!re_phone().is_match(&digits))
                .then(|| ValidationError::new(field, "Please enter a valid phone number"))
        }
        "description" => max_len(field, "Description", len, DESCRIPTION_MAX_LEN),
        "address"     => max_len(field, "Address", len, ADDRESS_MAX_LEN),
        "category"    => max_len(field, "Category", len, CATEGORY_MAX_LEN),
        _ => None,
    }
}

fn max_len(field: &str, label: &str, len: usize, max: usize) -> Option<ValidationError> {
    (len > max).then(|| {
        ValidationError::new(field, format!("{label} must be {max} characters or less"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_formatting_is_stripped() {
        assert_eq!(validate_field("contactPhone", "+1 (555) 123-4567", None), None);
        assert!(validate_field("contactPhone", "call me", None).is_some());
    }

    #[test]
    fn url_scheme_is_optional() {
        assert_eq!(validate_field("website", "acme.com", None), None);
        assert_eq!(validate_field("website", "https://www.acme.io/about", None), None);
        assert!(validate_field("website", "http://", None).is_some());
    }

    #[test]
    fn unknown_field_passes() {
        assert_eq!(validate_field("favouriteColour", "", None), None);
    }
}
