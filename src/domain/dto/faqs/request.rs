use serde::Deserialize;
use validator::Validate;
use crate::utils::string_utils::{
    deserialize_optional_string, deserialize_optional_trimmed, deserialize_trimmed_string,
};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFaqRequest {
    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    #[validate(length(min = 1, message = "Question is required"))]
    pub question: String,

    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    #[validate(length(min = 1, message = "Answer is required"))]
    pub answer: String,

    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    #[serde(default)]
    pub order: Option<i32>,

    #[serde(default)]
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFaqRequest {
    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    #[validate(length(min = 1, message = "FAQ ID is required"))]
    pub id: String,

    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(length(min = 1, message = "Question is required"))]
    pub question: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(length(min = 1, message = "Answer is required"))]
    pub answer: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: Option<String>,

    #[serde(default)]
    pub order: Option<i32>,

    #[serde(default)]
    pub is_published: Option<bool>,
}

/// `GET /api/v1/faq` query: `?id=` wins over `?category=`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FaqQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category: Option<String>,
}
