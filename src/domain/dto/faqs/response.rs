use serde::{Deserialize, Serialize};
use crate::domain::entities::Faq;
use crate::utils::time_utils::to_iso_string;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub order: i32,
    pub is_published: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Faq> for FaqResponse {
    fn from(faq: Faq) -> Self {
        Self {
            id: faq.id.map(|id| id.to_hex()).unwrap_or_default(),
            question: faq.question,
            answer: faq.answer,
            category: faq.category,
            order: faq.order,
            is_published: faq.is_published,
            created_at: to_iso_string(faq.created_at),
            updated_at: to_iso_string(faq.updated_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SingleFaqResponse {
    pub success: bool,
    pub faq: FaqResponse,
}

#[derive(Debug, Serialize)]
pub struct FaqSavedResponse {
    pub success: bool,
    pub message: String,
    pub faq: FaqResponse,
}

#[derive(Debug, Serialize)]
pub struct FaqListResponse {
    pub success: bool,
    pub faqs: Vec<FaqResponse>,
}
