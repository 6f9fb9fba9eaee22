//! Conversions between BSON timestamps and `chrono`.

use chrono::{SecondsFormat, TimeZone, Utc};
use mongodb::bson::DateTime;

pub fn to_chrono(value: DateTime) -> chrono::DateTime<Utc> {
    Utc.timestamp_millis_opt(value.timestamp_millis())
        .single()
        .unwrap_or_default()
}

pub fn from_chrono(value: chrono::DateTime<Utc>) -> DateTime {
    DateTime::from_millis(value.timestamp_millis())
}

/// Same shape as JavaScript's `Date.toISOString()`: `2025-03-01T14:05:09.120Z`.
pub fn to_iso_string(value: DateTime) -> String {
    to_chrono(value).to_rfc3339_opts(SecondsFormat::Millis, true)
}
