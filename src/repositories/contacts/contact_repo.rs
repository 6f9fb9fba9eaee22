use std::sync::Arc;
use singleton_macro::repository;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, DateTime},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use crate::core::errors::AppError;
use crate::db::Database;
use crate::domain::entities::{Contact, ContactStatus};
use crate::repositories::{inserted_object_id, parse_object_id};

#[repository(name = "contact", collection = "contacts")]
pub struct ContactRepository {
    db: Arc<Database>,
}

impl ContactRepository {
    fn contacts(&self) -> Collection<Contact> {
        self.collection::<Contact>()
    }

    pub async fn create(&self, mut contact: Contact) -> Result<Contact, AppError> {
        let result = self.contacts().insert_one(&contact).await?;
        contact.id = Some(inserted_object_id(&result)?);
        Ok(contact)
    }

    /// Newest first, optionally restricted to one status.
    pub async fn list(&self, status: Option<ContactStatus>) -> Result<Vec<Contact>, AppError> {
        let filter = match status {
            Some(status) => doc! { "status": status.as_str() },
            None => doc! {},
        };

        let contacts = self
            .contacts()
            .find(filter)
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await?;

        Ok(contacts)
    }

    /// Returns the updated contact, `None` when it does not exist.
    pub async fn update_status(
        &self,
        id: &str,
        status: ContactStatus,
    ) -> Result<Option<Contact>, AppError> {
        let Some(object_id) = parse_object_id(id) else {
            return Ok(None);
        };

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .contacts()
            .find_one_and_update(
                doc! { "_id": object_id },
                doc! { "$set": { "status": status.as_str(), "updatedAt": DateTime::now() } },
            )
            .with_options(options)
            .await?;

        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let Some(object_id) = parse_object_id(id) else {
            return Ok(false);
        };

        let result = self.contacts().delete_one(doc! { "_id": object_id }).await?;
        Ok(result.deleted_count > 0)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let created_at_index = IndexModel::builder()
            .keys(doc! { "createdAt": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        let status_index = IndexModel::builder()
            .keys(doc! { "status": 1, "createdAt": -1 })
            .options(IndexOptions::builder()
                .name("status_created_at".to_string())
                .build())
            .build();

        self.contacts()
            .create_indexes([created_at_index, status_index])
            .await?;

        Ok(())
    }
}
