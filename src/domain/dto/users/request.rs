use serde::Deserialize;
use validator::{Validate, ValidationError};
use crate::utils::string_utils::deserialize_trimmed_string;

/// `POST /api/v1/register`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    #[validate(
        length(min = 8, message = "Password must be at least 8 characters"),
        custom(function = "validate_password_strength")
    )]
    pub password: String,
}

/// `POST /api/v1/login`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// At least one uppercase letter and one digit.
fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_uppercase = password.chars().any(|c| c.is_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !(has_uppercase && has_digit) {
        return Err(ValidationError::new("weak_password")
            .with_message("Password must contain at least 1 uppercase letter and 1 number".into()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(name: &str, email: &str, password: &str) -> RegisterRequest {
        serde_json::from_value(serde_json::json!({
            "name": name,
            "email": email,
            "password": password,
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_registration() {
        let request = register("  Chris Vega ", " chris@example.com ", "Gutters2025");
        assert!(request.validate().is_ok());
        assert_eq!(request.name, "Chris Vega");
        assert_eq!(request.email, "chris@example.com");
    }

    #[test]
    fn test_password_rules() {
        let short = register("Chris", "chris@example.com", "Ab1");
        let errors = short.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));

        let no_digit = register("Chris", "chris@example.com", "Passwordonly");
        assert!(no_digit.validate().is_err());

        let no_upper = register("Chris", "chris@example.com", "password123");
        assert!(no_upper.validate().is_err());
    }

    #[test]
    fn test_blank_name_and_bad_email() {
        let request = register("   ", "not-an-email", "Gutters2025");
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn test_missing_fields_fail_validation_not_parsing() {
        let request: RegisterRequest = serde_json::from_str("{}").unwrap();
        let errors = request.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 3);
    }

    #[test]
    fn test_login_validation() {
        let ok: LoginRequest =
            serde_json::from_str(r#"{"email": "admin@example.com", "password": "x"}"#).unwrap();
        assert!(ok.validate().is_ok());

        let empty_password: LoginRequest =
            serde_json::from_str(r#"{"email": "admin@example.com", "password": ""}"#).unwrap();
        assert!(empty_password.validate().is_err());

        let bad_email: LoginRequest =
            serde_json::from_str(r#"{"email": "admin", "password": "secret"}"#).unwrap();
        assert!(bad_email.validate().is_err());
    }
}
