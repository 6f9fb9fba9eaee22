//! # Domain models
//!
//! Values that are neither stored documents nor wire DTOs:
//!
//! - [`auth`] - the caller identity resolved from a session token, plus the
//!   `AuthenticatedUser` / `OptionalUser` / `AdminUser` extractors
//! - [`token`] - JWT claims
//! - [`analytics`] - visitor sightings and the aggregated traffic report

pub mod auth;
pub mod token;
pub mod analytics;
