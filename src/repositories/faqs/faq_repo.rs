use std::sync::Arc;
use singleton_macro::repository;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, DateTime, Document},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use crate::core::errors::AppError;
use crate::db::Database;
use crate::domain::entities::Faq;
use crate::repositories::{inserted_object_id, parse_object_id};

#[repository(name = "faq", collection = "faqs")]
pub struct FaqRepository {
    db: Arc<Database>,
}

impl FaqRepository {
    fn faqs(&self) -> Collection<Faq> {
        self.collection::<Faq>()
    }

    pub async fn create(&self, mut faq: Faq) -> Result<Faq, AppError> {
        let result = self.faqs().insert_one(&faq).await?;
        faq.id = Some(inserted_object_id(&result)?);
        Ok(faq)
    }

    /// Any FAQ, published or not.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Faq>, AppError> {
        let Some(object_id) = parse_object_id(id) else {
            return Ok(None);
        };

        Ok(self.faqs().find_one(doc! { "_id": object_id }).await?)
    }

    /// Entries in the order the FAQ page renders them. Drafts are left out
    /// unless `include_drafts` is set.
    pub async fn find_listing(
        &self,
        category: Option<&str>,
        include_drafts: bool,
    ) -> Result<Vec<Faq>, AppError> {
        let sort = match category {
            Some(_) => doc! { "order": 1, "createdAt": -1 },
            None => doc! { "order": 1, "category": 1, "createdAt": -1 },
        };

        self.find_sorted(listing_filter(category, include_drafts), sort)
            .await
    }

    async fn find_sorted(&self, filter: Document, sort: Document) -> Result<Vec<Faq>, AppError> {
        let faqs = self
            .faqs()
            .find(filter)
            .sort(sort)
            .await?
            .try_collect()
            .await?;

        Ok(faqs)
    }

    /// Applies `changes` with `$set` and bumps `updatedAt`.
    pub async fn update(&self, id: &str, mut changes: Document) -> Result<Option<Faq>, AppError> {
        let Some(object_id) = parse_object_id(id) else {
            return Ok(None);
        };

        changes.insert("updatedAt", DateTime::now());

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .faqs()
            .find_one_and_update(doc! { "_id": object_id }, doc! { "$set": changes })
            .with_options(options)
            .await?;

        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let Some(object_id) = parse_object_id(id) else {
            return Ok(false);
        };

        let result = self.faqs().delete_one(doc! { "_id": object_id }).await?;
        Ok(result.deleted_count > 0)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let category_index = IndexModel::builder()
            .keys(doc! { "category": 1, "order": 1 })
            .options(IndexOptions::builder()
                .name("category_order".to_string())
                .build())
            .build();

        let published_index = IndexModel::builder()
            .keys(doc! { "isPublished": 1 })
            .options(IndexOptions::builder()
                .name("is_published".to_string())
                .build())
            .build();

        self.faqs()
            .create_indexes([category_index, published_index])
            .await?;

        Ok(())
    }
}

pub(crate) fn listing_filter(category: Option<&str>, include_drafts: bool) -> Document {
    let mut filter = doc! {};
    if let Some(category) = category {
        filter.insert("category", category);
    }
    if !include_drafts {
        filter.insert("isPublished", true);
    }
    filter
}
