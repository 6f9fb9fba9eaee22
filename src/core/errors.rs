//! # Application Error Handling
//!
//! Every fallible operation in the backend returns [`AppError`]. Handlers
//! return `Result<HttpResponse, AppError>` and Actix turns the error into a
//! JSON response through the [`actix_web::ResponseError`] implementation below.
//!
//! ## Response shape
//!
//! All error responses share the envelope the website frontend already reads:
//!
//! ```json
//! { "success": false, "message": "Validation error", "errors": { "email": ["Invalid email format"] } }
//! ```
//!
//! `errors` is only present for field-level validation failures.
//!
//! ## Status mapping
//!
//! | Variant | Status |
//! |---------|--------|
//! | `ValidationError`, `InvalidInput` | 400 |
//! | `AuthenticationError` | 401 |
//! | `AuthorizationError` | 403 |
//! | `NotFound` | 404 |
//! | `ConflictError` | 409 |
//! | `RateLimited` | 429 |
//! | everything else | 500 |
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::core::errors::AppError;
//!
//! let review = repo
//!     .find_by_id(id)
//!     .await?
//!     .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;
//! ```

use std::collections::BTreeMap;
use actix_web::http::StatusCode;
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("{0}")]
    ValidationError(String),

    /// Field-level validation failures produced by `validator`
    #[error("Validation error")]
    InvalidInput(ValidationErrors),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    ConflictError(String),

    #[error("{0}")]
    AuthenticationError(String),

    #[error("{0}")]
    AuthorizationError(String),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// Message exposed to API clients.
    ///
    /// Server-side failures are collapsed into a generic message so that
    /// database or driver details never leak into responses.
    pub fn public_message(&self) -> String {
        match self {
            AppError::DatabaseError(_)
            | AppError::ExternalServiceError(_)
            | AppError::InternalError(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Flattens `validator` errors into `{ field: [message, ...] }`.
    pub fn field_errors(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
        let mut fields = BTreeMap::new();

        for (field, field_errors) in errors.field_errors() {
            let messages = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", e.code))
                })
                .collect();
            fields.insert(field.to_string(), messages);
        }

        fields
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::InvalidInput(errors)
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("{}", self);
        }

        let body = match self {
            AppError::InvalidInput(errors) => json!({
                "success": false,
                "message": "Validation error",
                "errors": Self::field_errors(errors),
            }),
            other => json!({
                "success": false,
                "message": other.public_message(),
            }),
        };

        actix_web::HttpResponse::build(status).json(body)
    }
}

pub type AppResult<T> = Result<T, AppError>;

pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::body::MessageBody;
    use validator::ValidationError;

    fn body_json(error: AppError) -> serde_json::Value {
        let response = error.error_response();
        let bytes = response.into_body().try_into_bytes().unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("Contact ID is required".to_string());
        assert_eq!(error.error_response().status(), StatusCode::BAD_REQUEST);

        let body = body_json(error);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Contact ID is required");
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("Review not found".to_string());
        assert_eq!(error.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_error_response() {
        let error = AppError::ConflictError("Email already registered".to_string());
        assert_eq!(error.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_authentication_and_authorization_responses() {
        let unauthorized = AppError::AuthenticationError("Unauthorized".to_string());
        assert_eq!(unauthorized.error_response().status(), StatusCode::UNAUTHORIZED);

        let forbidden = AppError::AuthorizationError("Admin access required".to_string());
        assert_eq!(forbidden.error_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_rate_limited_response() {
        let error = AppError::RateLimited;
        assert_eq!(error.error_response().status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body_json(error)["message"], "Rate limit exceeded");
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let error = AppError::DatabaseError("connection refused at 10.0.0.3".to_string());
        assert_eq!(error.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(error);
        assert_eq!(body["message"], "Internal server error");
    }

    #[test]
    fn test_invalid_input_lists_field_errors() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "email",
            ValidationError::new("email").with_message("Invalid email format".into()),
        );

        let body = body_json(AppError::from(errors));
        assert_eq!(body["message"], "Validation error");
        assert_eq!(body["errors"]["email"][0], "Invalid email format");
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        match app_result {
            Err(AppError::InternalError(msg)) => {
                assert!(msg.contains("Additional context"));
                assert!(msg.contains("original error"));
            }
            _ => panic!("Expected InternalError"),
        }
    }
}
