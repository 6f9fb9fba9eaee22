use serde::{Deserialize, Serialize};
use crate::domain::entities::{Review, ReviewSource};
use crate::utils::time_utils::to_iso_string;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub rating: i32,
    pub comment: String,
    pub source: ReviewSource,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: review.name,
            rating: review.rating,
            comment: review.comment,
            source: review.source,
            created_at: to_iso_string(review.created_at),
            updated_at: to_iso_string(review.updated_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SingleReviewResponse {
    pub success: bool,
    pub review: ReviewResponse,
}

#[derive(Debug, Serialize)]
pub struct ReviewSavedResponse {
    pub success: bool,
    pub message: String,
    pub review: ReviewResponse,
}

#[derive(Debug, Serialize)]
pub struct ReviewListResponse {
    pub success: bool,
    pub reviews: Vec<ReviewResponse>,
}
