use std::sync::Arc;
use singleton_macro::service;
use mongodb::bson::{doc, Document};
use crate::caching::redis::RedisClient;
use crate::config::CacheConfig;
use crate::core::errors::AppError;
use crate::domain::dto::reviews::{
    CreateReviewRequest, ReviewListResponse, ReviewResponse, ReviewSavedResponse,
    SingleReviewResponse, UpdateReviewRequest,
};
use crate::domain::entities::{Review, ReviewSource};
use crate::repositories::reviews::ReviewRepository;

const REVIEWS_CACHE_KEY: &str = "reviews:all";
const REVIEWS_CACHE_PATTERN: &str = "reviews:*";

#[service(name = "review")]
pub struct ReviewService {
    review_repo: Arc<ReviewRepository>,
    redis: Arc<RedisClient>,
}

impl ReviewService {
    pub async fn get(&self, id: &str) -> Result<SingleReviewResponse, AppError> {
        let review = self
            .review_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

        Ok(SingleReviewResponse {
            success: true,
            review: ReviewResponse::from(review),
        })
    }

    /// All reviews, newest first, served from Redis when cached.
    pub async fn list(&self) -> Result<ReviewListResponse, AppError> {
        if let Ok(Some(reviews)) = self.redis.get::<Vec<ReviewResponse>>(REVIEWS_CACHE_KEY).await {
            return Ok(ReviewListResponse { success: true, reviews });
        }

        let reviews: Vec<ReviewResponse> = self
            .review_repo
            .find_all()
            .await?
            .into_iter()
            .map(ReviewResponse::from)
            .collect();

        if let Err(e) = self
            .redis
            .set_with_expiry(REVIEWS_CACHE_KEY, &reviews, CacheConfig::ttl_seconds())
            .await
        {
            log::warn!("Failed to cache reviews: {}", e);
        }

        Ok(ReviewListResponse { success: true, reviews })
    }

    pub async fn create(&self, request: CreateReviewRequest) -> Result<ReviewSavedResponse, AppError> {
        let rating = request.rating_value();
        let source = request.source_value();
        let review = Review::new(request.name, rating, request.comment, source);

        let review = self.review_repo.create(review).await?;
        self.invalidate_cache().await;
        log::info!("⭐ Review added by {}", review.name);

        Ok(ReviewSavedResponse {
            success: true,
            message: "Review created successfully".to_string(),
            review: ReviewResponse::from(review),
        })
    }

    pub async fn update(&self, request: UpdateReviewRequest) -> Result<ReviewSavedResponse, AppError> {
        let changes = review_changes(&request);

        let review = self
            .review_repo
            .update(&request.id, changes)
            .await?
            .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

        self.invalidate_cache().await;

        Ok(ReviewSavedResponse {
            success: true,
            message: "Review updated successfully".to_string(),
            review: ReviewResponse::from(review),
        })
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if !self.review_repo.delete(id).await? {
            return Err(AppError::NotFound("Review not found".to_string()));
        }

        self.invalidate_cache().await;
        log::info!("🗑️ Review {} deleted", id);
        Ok(())
    }

    async fn invalidate_cache(&self) {
        if let Err(e) = self.redis.invalidate_pattern(REVIEWS_CACHE_PATTERN).await {
            log::warn!("Failed to invalidate review cache: {}", e);
        }
    }
}

/// `$set` document for the fields present in a validated update.
fn review_changes(request: &UpdateReviewRequest) -> Document {
    let mut changes = doc! {};

    if let Some(name) = &request.name {
        changes.insert("name", name.as_str());
    }
    if let Some(rating) = request.rating {
        changes.insert("rating", rating as i32);
    }
    if let Some(comment) = &request.comment {
        changes.insert("comment", comment.as_str());
    }
    if let Some(source) = request.source.as_deref().and_then(ReviewSource::parse) {
        changes.insert("source", source.as_str());
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_review_changes_only_include_present_fields() {
        let request: UpdateReviewRequest = serde_json::from_value(json!({
            "id": "65f1c0a2b3d4e5f6a7b8c9d0",
            "rating": 4,
            "source": "Yelp",
        }))
        .unwrap();

        let changes = review_changes(&request);

        assert_eq!(changes.len(), 2);
        assert_eq!(changes.get_i32("rating").unwrap(), 4);
        assert_eq!(changes.get_str("source").unwrap(), "Yelp");
    }

    #[test]
    fn test_empty_update_sets_nothing() {
        let request: UpdateReviewRequest =
            serde_json::from_value(json!({ "id": "65f1c0a2b3d4e5f6a7b8c9d0" })).unwrap();
        assert!(review_changes(&request).is_empty());
    }
}
