use std::sync::Arc;
use singleton_macro::service;
use mongodb::bson::{doc, Document};
use crate::caching::redis::RedisClient;
use crate::config::CacheConfig;
use crate::core::errors::AppError;
use crate::domain::dto::faqs::{
    CreateFaqRequest, FaqListResponse, FaqResponse, FaqSavedResponse, SingleFaqResponse,
    UpdateFaqRequest,
};
use crate::domain::entities::Faq;
use crate::repositories::faqs::FaqRepository;

const FAQ_CACHE_PATTERN: &str = "faqs:*";

#[service(name = "faq")]
pub struct FaqService {
    faq_repo: Arc<FaqRepository>,
    redis: Arc<RedisClient>,
}

impl FaqService {
    /// Any FAQ by id, drafts included.
    pub async fn get(&self, id: &str) -> Result<SingleFaqResponse, AppError> {
        let faq = self
            .faq_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("FAQ not found".to_string()))?;

        Ok(SingleFaqResponse {
            success: true,
            faq: FaqResponse::from(faq),
        })
    }

    /// Published entries, optionally for one category.
    ///
    /// Admin listings also get unpublished drafts and bypass the cache.
    pub async fn list(&self, category: Option<&str>, include_drafts: bool) -> Result<FaqListResponse, AppError> {
        let Some(cache_key) = cache_key(category, include_drafts) else {
            let faqs = self.faq_repo.find_listing(category, true).await?;
            return Ok(FaqListResponse {
                success: true,
                faqs: faqs.into_iter().map(FaqResponse::from).collect(),
            });
        };

        if let Ok(Some(faqs)) = self.redis.get::<Vec<FaqResponse>>(&cache_key).await {
            return Ok(FaqListResponse { success: true, faqs });
        }

        let faqs = self.faq_repo.find_listing(category, false).await?;
        let faqs: Vec<FaqResponse> = faqs.into_iter().map(FaqResponse::from).collect();

        if let Err(e) = self
            .redis
            .set_with_expiry(&cache_key, &faqs, CacheConfig::ttl_seconds())
            .await
        {
            log::warn!("Failed to cache FAQs: {}", e);
        }

        Ok(FaqListResponse { success: true, faqs })
    }

    pub async fn create(&self, request: CreateFaqRequest) -> Result<FaqSavedResponse, AppError> {
        let faq = Faq::new(
            request.question,
            request.answer,
            request.category,
            request.order,
            request.is_published,
        );

        let faq = self.faq_repo.create(faq).await?;
        self.invalidate_cache().await;
        log::info!("❓ FAQ added in {}", faq.category);

        Ok(FaqSavedResponse {
            success: true,
            message: "FAQ created successfully".to_string(),
            faq: FaqResponse::from(faq),
        })
    }

    pub async fn update(&self, request: UpdateFaqRequest) -> Result<FaqSavedResponse, AppError> {
        let changes = faq_changes(&request);

        let faq = self
            .faq_repo
            .update(&request.id, changes)
            .await?
            .ok_or_else(|| AppError::NotFound("FAQ not found".to_string()))?;

        self.invalidate_cache().await;

        Ok(FaqSavedResponse {
            success: true,
            message: "FAQ updated successfully".to_string(),
            faq: FaqResponse::from(faq),
        })
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if !self.faq_repo.delete(id).await? {
            return Err(AppError::NotFound("FAQ not found".to_string()));
        }

        self.invalidate_cache().await;
        log::info!("🗑️ FAQ {} deleted", id);
        Ok(())
    }

    async fn invalidate_cache(&self) {
        if let Err(e) = self.redis.invalidate_pattern(FAQ_CACHE_PATTERN).await {
            log::warn!("Failed to invalidate FAQ cache: {}", e);
        }
    }
}

/// `None` for listings that include drafts; those are never cached.
fn cache_key(category: Option<&str>, include_drafts: bool) -> Option<String> {
    if include_drafts {
        return None;
    }

    Some(match category {
        Some(category) => format!("faqs:category:{}", category),
        None => "faqs:published".to_string(),
    })
}

fn faq_changes(request: &UpdateFaqRequest) -> Document {
    let mut changes = doc! {};

    if let Some(question) = &request.question {
        changes.insert("question", question.as_str());
    }
    if let Some(answer) = &request.answer {
        changes.insert("answer", answer.as_str());
    }
    if let Some(category) = &request.category {
        changes.insert("category", category.as_str());
    }
    if let Some(order) = request.order {
        changes.insert("order", order);
    }
    if let Some(is_published) = request.is_published {
        changes.insert("isPublished", is_published);
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cache_keys() {
        assert_eq!(cache_key(None, false).as_deref(), Some("faqs:published"));
        assert_eq!(
            cache_key(Some("Installation"), false).as_deref(),
            Some("faqs:category:Installation")
        );
    }

    #[test]
    fn test_listings_with_drafts_are_not_cached() {
        assert_eq!(cache_key(None, true), None);
        assert_eq!(cache_key(Some("Installation"), true), None);
    }

    #[test]
    fn test_faq_changes_use_stored_field_names() {
        let request: UpdateFaqRequest = serde_json::from_value(json!({
            "id": "65f1c0a2b3d4e5f6a7b8c9d0",
            "answer": "Most installs take one day.",
            "isPublished": false,
            "order": 3,
        }))
        .unwrap();

        let changes = faq_changes(&request);

        assert_eq!(changes.len(), 3);
        assert_eq!(changes.get_str("answer").unwrap(), "Most installs take one day.");
        assert!(!changes.get_bool("isPublished").unwrap());
        assert_eq!(changes.get_i32("order").unwrap(), 3);
    }
}
