//! Data access layer.
//!
//! One repository per MongoDB collection. Each is declared with
//! `#[repository]`, which registers it with the
//! [`ServiceLocator`](crate::core::registry::ServiceLocator). Indexes are
//! created by [`create_indexes`] once the locator has been initialized.
//!
//! ```rust,ignore
//! use crate::repositories::contacts::ContactRepository;
//!
//! let contacts = ContactRepository::instance().list(None).await?;
//! ```
//!
//! Methods that take a document id accept the raw hex string. An id that is
//! not a valid `ObjectId` cannot match any document, so lookups return
//! `None` and deletes return `false` instead of failing.

pub mod users;
pub mod contacts;
pub mod reviews;
pub mod faqs;
pub mod analytics;

use mongodb::bson::oid::ObjectId;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::results::InsertOneResult;
use crate::core::errors::AppError;
use crate::repositories::analytics::ThumbprintRepository;
use crate::repositories::contacts::ContactRepository;
use crate::repositories::faqs::FaqRepository;
use crate::repositories::reviews::ReviewRepository;
use crate::repositories::users::UserRepository;

const DUPLICATE_KEY: i32 = 11000;

pub(crate) fn parse_object_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id.trim()).ok()
}

pub(crate) fn inserted_object_id(result: &InsertOneResult) -> Result<ObjectId, AppError> {
    result
        .inserted_id
        .as_object_id()
        .ok_or_else(|| AppError::InternalError("Inserted id is not an ObjectId".to_string()))
}

/// Unique index violation (`E11000`).
pub(crate) fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
        _ => false,
    }
}

/// Creates the indexes of every collection. Idempotent.
pub async fn create_indexes() -> Result<(), AppError> {
    UserRepository::instance().create_indexes().await?;
    ContactRepository::instance().create_indexes().await?;
    ReviewRepository::instance().create_indexes().await?;
    FaqRepository::instance().create_indexes().await?;
    ThumbprintRepository::instance().create_indexes().await?;

    log::info!("🗂️ Indexes ready");
    Ok(())
}
