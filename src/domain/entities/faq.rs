use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::utils::number_utils::deserialize_whole_number;

/// Question and answer shown on the FAQ page.
///
/// Entries are grouped by `category` and sorted by `order` ascending.
/// Unpublished entries are only visible to administrators.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub question: String,
    pub answer: String,
    pub category: String,
    #[serde(default, deserialize_with = "deserialize_whole_number")]
    pub order: i32,
    #[serde(default = "default_published")]
    pub is_published: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

fn default_published() -> bool {
    true
}

impl Faq {
    pub fn new(
        question: String,
        answer: String,
        category: String,
        order: Option<i32>,
        is_published: Option<bool>,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            question,
            answer,
            category,
            order: order.unwrap_or(0),
            is_published: is_published.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc};

    #[test]
    fn test_defaults() {
        let faq = Faq::new(
            "Do you offer free estimates?".to_string(),
            "Yes, always.".to_string(),
            "Pricing".to_string(),
            None,
            None,
        );

        assert_eq!(faq.order, 0);
        assert!(faq.is_published);
    }

    #[test]
    fn test_stored_field_names() {
        let faq = Faq::new(
            "How long does installation take?".to_string(),
            "Usually one day.".to_string(),
            "Installation".to_string(),
            Some(3),
            Some(false),
        );

        let doc = bson::to_document(&faq).unwrap();
        assert_eq!(doc.get_i32("order").unwrap(), 3);
        assert!(!doc.get_bool("isPublished").unwrap());
    }

    #[test]
    fn test_reads_order_stored_as_double() {
        let stored = doc! {
            "question": "Do you clean gutters?",
            "answer": "Yes.",
            "category": "Services",
            "order": 2.0,
            "createdAt": DateTime::now(),
            "updatedAt": DateTime::now(),
        };

        let faq: Faq = bson::from_document(stored).unwrap();
        assert_eq!(faq.order, 2);
        assert!(faq.is_published);
    }
}
