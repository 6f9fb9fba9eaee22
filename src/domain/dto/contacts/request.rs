use serde::Deserialize;
use validator::{Validate, ValidationError};
use crate::domain::entities::ContactStatus;
use crate::utils::string_utils::{deserialize_optional_string, deserialize_trimmed_string};

/// Public contact form submission.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    #[validate(length(min = 1, message = "Email is required"), email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,

    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,

    /// Set by the site's analytics script when it has identified the visitor.
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub fingerprint_hash: Option<String>,
}

/// Admin status change.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateContactRequest {
    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    #[validate(length(min = 1, message = "Contact ID is required"))]
    pub id: String,

    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    #[validate(custom(function = "validate_contact_status"))]
    pub status: String,
}

impl UpdateContactRequest {
    /// Only meaningful after `validate()` succeeded.
    pub fn parsed_status(&self) -> Option<ContactStatus> {
        ContactStatus::parse(&self.status)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactListQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub status: Option<String>,
}

pub(crate) fn validate_contact_status(status: &str) -> Result<(), ValidationError> {
    if ContactStatus::parse(status).is_none() {
        return Err(ValidationError::new("invalid_status").with_message(
            "Status must be one of: new, contacted, resolved, archived".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_contact_form_is_trimmed_and_valid() {
        let request: CreateContactRequest = serde_json::from_value(json!({
            "name": " Morgan Lee ",
            "email": "morgan@example.com ",
            "phone": " (281) 555-0134",
            "message": " Need a quote for seamless gutters ",
            "fingerprintHash": "fp-77",
        }))
        .unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(request.name, "Morgan Lee");
        assert_eq!(request.phone, "(281) 555-0134");
        assert_eq!(request.fingerprint_hash.as_deref(), Some("fp-77"));
    }

    #[test]
    fn test_contact_form_reports_each_missing_field() {
        let request: CreateContactRequest =
            serde_json::from_value(json!({ "email": "bad" })).unwrap();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("phone"));
        assert!(fields.contains_key("message"));
    }

    #[test]
    fn test_update_requires_id_and_known_status() {
        let request: UpdateContactRequest =
            serde_json::from_value(json!({ "id": "", "status": "spam" })).unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("id"));
        assert!(errors.field_errors().contains_key("status"));

        let request: UpdateContactRequest = serde_json::from_value(json!({
            "id": "65f1c0a2b3d4e5f6a7b8c9d0",
            "status": "resolved",
        }))
        .unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.parsed_status(), Some(ContactStatus::Resolved));
    }
}
