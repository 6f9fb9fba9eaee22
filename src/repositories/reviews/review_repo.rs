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
use crate::domain::entities::Review;
use crate::repositories::{inserted_object_id, parse_object_id};

#[repository(name = "review", collection = "reviews")]
pub struct ReviewRepository {
    db: Arc<Database>,
}

impl ReviewRepository {
    fn reviews(&self) -> Collection<Review> {
        self.collection::<Review>()
    }

    pub async fn create(&self, mut review: Review) -> Result<Review, AppError> {
        let result = self.reviews().insert_one(&review).await?;
        review.id = Some(inserted_object_id(&result)?);
        Ok(review)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Review>, AppError> {
        let Some(object_id) = parse_object_id(id) else {
            return Ok(None);
        };

        Ok(self.reviews().find_one(doc! { "_id": object_id }).await?)
    }

    /// All reviews, newest first.
    pub async fn find_all(&self) -> Result<Vec<Review>, AppError> {
        let reviews = self
            .reviews()
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await?;

        Ok(reviews)
    }

    /// Applies `changes` with `$set` and bumps `updatedAt`.
    pub async fn update(&self, id: &str, mut changes: Document) -> Result<Option<Review>, AppError> {
        let Some(object_id) = parse_object_id(id) else {
            return Ok(None);
        };

        changes.insert("updatedAt", DateTime::now());

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .reviews()
            .find_one_and_update(doc! { "_id": object_id }, doc! { "$set": changes })
            .with_options(options)
            .await?;

        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let Some(object_id) = parse_object_id(id) else {
            return Ok(false);
        };

        let result = self.reviews().delete_one(doc! { "_id": object_id }).await?;
        Ok(result.deleted_count > 0)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let created_at_index = IndexModel::builder()
            .keys(doc! { "createdAt": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.reviews().create_indexes([created_at_index]).await?;

        Ok(())
    }
}
