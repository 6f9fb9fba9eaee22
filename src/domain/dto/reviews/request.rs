use serde::Deserialize;
use validator::{Validate, ValidationError};
use crate::domain::entities::ReviewSource;
use crate::utils::string_utils::{deserialize_optional_trimmed, deserialize_trimmed_string};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(
        required(message = "Rating is required"),
        range(min = 1.0, max = 5.0, message = "Rating must be between 1 and 5"),
        custom(function = "validate_whole_rating")
    )]
    pub rating: Option<f64>,

    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    #[validate(length(min = 1, message = "Comment is required"))]
    pub comment: String,

    #[serde(default)]
    #[validate(custom(function = "validate_review_source"))]
    pub source: String,
}

impl CreateReviewRequest {
    pub fn rating_value(&self) -> i32 {
        self.rating.map(|r| r as i32).unwrap_or_default()
    }

    pub fn source_value(&self) -> ReviewSource {
        ReviewSource::parse(&self.source).unwrap_or(ReviewSource::Other)
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateReviewRequest {
    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    #[validate(length(min = 1, message = "Review ID is required"))]
    pub id: String,

    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,

    #[serde(default)]
    #[validate(
        range(min = 1.0, max = 5.0, message = "Rating must be between 1 and 5"),
        custom(function = "validate_whole_rating")
    )]
    pub rating: Option<f64>,

    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(length(min = 1, message = "Comment is required"))]
    pub comment: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_review_source"))]
    pub source: Option<String>,
}

/// Ratings are whole stars.
fn validate_whole_rating(rating: f64) -> Result<(), ValidationError> {
    if rating.fract() != 0.0 {
        return Err(ValidationError::new("whole_rating")
            .with_message("Rating must be a whole number".into()));
    }
    Ok(())
}

fn validate_review_source(source: &str) -> Result<(), ValidationError> {
    if ReviewSource::parse(source).is_none() {
        return Err(ValidationError::new("invalid_source")
            .with_message("Invalid review source".into()));
    }
    Ok(())
}
