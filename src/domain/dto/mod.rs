//! # Request and response bodies
//!
//! Request DTOs derive `Deserialize + Validate`; handlers call
//! `payload.validate()?` before touching a service, so field-level failures
//! come back as `400 {"success": false, "message": "Validation error",
//! "errors": {...}}`.
//!
//! Response DTOs render stored documents the way the site frontend reads
//! them: `_id` as a hex string, camelCase keys, ISO-8601 dates.
//!
//! ```text
//! dto/
//! ├── users/      register, login, current user
//! ├── contacts/   contact form and admin status updates
//! ├── reviews/    customer reviews
//! ├── faqs/       FAQ entries
//! └── analytics/  fingerprint sightings, page view beacons, report query
//! ```

pub mod users;
pub mod contacts;
pub mod reviews;
pub mod faqs;
pub mod analytics;

use serde::{Deserialize, Serialize};

/// `?id=` query shared by the single-document endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdQuery {
    #[serde(default, deserialize_with = "crate::utils::string_utils::deserialize_optional_string")]
    pub id: Option<String>,
}

/// `{"success": true, "message": "..."}`
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
