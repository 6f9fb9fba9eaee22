use std::sync::Arc;
use singleton_macro::repository;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};
use crate::core::errors::AppError;
use crate::db::Database;
use crate::domain::entities::User;
use crate::repositories::{inserted_object_id, is_duplicate_key, parse_object_id};

#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    db: Arc<Database>,
}

impl UserRepository {
    fn users(&self) -> Collection<User> {
        self.collection::<User>()
    }

    /// `email` must already be normalised (trimmed, lowercased).
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.users().find_one(doc! { "email": email }).await?)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let Some(object_id) = parse_object_id(id) else {
            return Ok(None);
        };

        Ok(self.users().find_one(doc! { "_id": object_id }).await?)
    }

    /// Inserts `user`; a taken email is a `ConflictError`.
    pub async fn create(&self, mut user: User) -> Result<User, AppError> {
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(AppError::ConflictError("Email already registered".to_string()));
        }

        let result = self.users().insert_one(&user).await.map_err(|e| {
            // Lost a race with a concurrent registration.
            if is_duplicate_key(&e) {
                AppError::ConflictError("Email already registered".to_string())
            } else {
                AppError::from(e)
            }
        })?;

        user.id = Some(inserted_object_id(&result)?);
        log::info!("👤 User created: {}", user.email);

        Ok(user)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        self.users().create_indexes([email_index]).await?;

        Ok(())
    }
}
