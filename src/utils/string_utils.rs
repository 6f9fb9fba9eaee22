//! # String utilities
//!
//! Helpers for cleaning user input and building text output.

use serde::Deserialize;

/// Trims `value` and maps blank strings to `None`.
///
/// ```rust,ignore
/// use crate::utils::string_utils::clean_optional_string;
///
/// assert_eq!(clean_optional_string(Some("  Katy  ".to_string())), Some("Katy".to_string()));
/// assert_eq!(clean_optional_string(Some("   ".to_string())), None);
/// assert_eq!(clean_optional_string(None), None);
/// ```
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// serde deserializer that trims a required string field.
///
/// Blank values survive as `""` so that `#[validate(length(min = 1))]`
/// reports them with a field-level message.
///
/// ```rust,ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateContactRequest {
///     #[serde(deserialize_with = "deserialize_trimmed_string")]
///     #[validate(length(min = 1, message = "Name is required"))]
///     name: String,
/// }
/// ```
pub fn deserialize_trimmed_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

/// serde deserializer for optional string fields.
///
/// `null`, a missing key (with `#[serde(default)]`), `""` and whitespace-only
/// strings all become `None`; everything else is trimmed.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// serde deserializer for optional fields of partial updates.
///
/// Unlike [`deserialize_optional_string`] a blank value stays `Some("")`, so
/// `{"name": "  "}` is rejected by validation instead of being ignored.
pub fn deserialize_optional_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.map(|s| s.trim().to_string()))
}

/// `LoginThrottleService` → `login_throttle_service`.
pub fn to_snake_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);
    let chars: Vec<char> = name.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_lower = i > 0 && (chars[i - 1].is_lowercase() || chars[i - 1].is_ascii_digit());
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let prev_upper = i > 0 && chars[i - 1].is_uppercase();
            if prev_lower || (prev_upper && next_lower) {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(*c);
        }
    }

    result
}

/// Escapes text for inclusion in HTML or XML bodies.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }

    escaped
}
