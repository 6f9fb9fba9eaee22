//! HTTP handlers.
//!
//! Handlers validate input, resolve the caller through the auth extractors
//! and delegate to a service. Errors are returned as [`AppError`] and rendered
//! by its `ResponseError` impl; the analytics beacons are the exception and
//! answer with their own `{success, error}` body.
//!
//! [`AppError`]: crate::core::errors::AppError

pub mod auth;
pub mod contacts;
pub mod reviews;
pub mod faqs;
pub mod analytics;
pub mod site;
