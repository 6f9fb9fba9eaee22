//! # Number utilities

use serde::de::Error;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredNumber {
    Int(i64),
    Float(f64),
}

/// serde deserializer for integer fields of stored documents.
///
/// Accepts BSON `Int32`, `Int64` and `Double`; doubles are rounded to the
/// nearest whole number. Values written by other tools (the Mongo shell
/// stores `5` as a double) stay readable.
///
/// ```rust,ignore
/// #[derive(Deserialize)]
/// struct Review {
///     #[serde(deserialize_with = "deserialize_whole_number")]
///     rating: i32,
/// }
/// ```
pub fn deserialize_whole_number<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match StoredNumber::deserialize(deserializer)? {
        StoredNumber::Int(value) => i32::try_from(value)
            .map_err(|_| D::Error::custom(format!("number {} is out of range", value))),
        StoredNumber::Float(value) => {
            let rounded = value.round();
            if rounded.is_finite() && rounded >= i32::MIN as f64 && rounded <= i32::MAX as f64 {
                Ok(rounded as i32)
            } else {
                Err(D::Error::custom(format!("number {} is out of range", value)))
            }
        }
    }
}
