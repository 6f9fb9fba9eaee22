//! Shared helpers used across layers.
//!
//! - [`string_utils`] - trimming deserializers, case conversion, HTML escaping
//! - [`number_utils`] - lenient integer deserializer for stored documents
//! - [`time_utils`] - BSON ↔ `chrono` timestamps
//! - [`display_terminal`] - startup banners printed while components initialize

pub mod string_utils;
pub mod number_utils;
pub mod time_utils;
pub mod display_terminal;
