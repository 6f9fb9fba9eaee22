use std::sync::Arc;
use singleton_macro::service;
use mongodb::bson::DateTime;
use crate::core::errors::AppError;
use crate::domain::dto::contacts::{
    ContactCreatedResponse, ContactListResponse, ContactResponse, ContactUpdatedResponse,
    CreateContactRequest, UpdateContactRequest,
};
use crate::domain::entities::{Contact, ContactStatus};
use crate::repositories::analytics::thumbprint_repo::{ThumbprintRepository, CONTACT_FORM_CONVERSION};
use crate::repositories::contacts::ContactRepository;
use crate::services::notifications::NotificationService;

#[service(name = "contact")]
pub struct ContactService {
    contact_repo: Arc<ContactRepository>,
    thumbprint_repo: Arc<ThumbprintRepository>,
    notifications: Arc<NotificationService>,
}

impl ContactService {
    /// Stores a contact form submission.
    ///
    /// The owner notification and the visitor conversion are side effects:
    /// their failures are logged and never fail the submission.
    pub async fn create(&self, request: CreateContactRequest) -> Result<ContactCreatedResponse, AppError> {
        let contact = Contact::new(
            request.name,
            request.email.to_lowercase(),
            request.phone,
            request.message,
            request.fingerprint_hash,
        );

        let contact = self.contact_repo.create(contact).await?;
        log::info!("📨 New contact request from {}", contact.email);

        if let Err(e) = self.notifications.notify_new_contact(&contact).await {
            log::warn!("Contact notification failed: {}", e);
        }

        if let Some(hash) = &contact.fingerprint_hash {
            match self
                .thumbprint_repo
                .mark_converted(hash, CONTACT_FORM_CONVERSION, DateTime::now())
                .await
            {
                Ok(true) => log::info!("Visitor {} converted through the contact form", hash),
                Ok(false) => log::debug!("No thumbprint for converted visitor {}", hash),
                Err(e) => log::warn!("Failed to record conversion for {}: {}", hash, e),
            }
        }

        Ok(ContactCreatedResponse {
            success: true,
            message: "Contact created successfully".to_string(),
            contact: ContactResponse::from(contact),
        })
    }

    /// Newest first; `status` must be a known status when given.
    pub async fn list(&self, status: Option<&str>) -> Result<ContactListResponse, AppError> {
        let status = status
            .map(|s| {
                ContactStatus::parse(s)
                    .ok_or_else(|| AppError::ValidationError(format!("Invalid status: {}", s)))
            })
            .transpose()?;

        let contacts = self.contact_repo.list(status).await?;

        Ok(ContactListResponse {
            success: true,
            contacts: contacts.into_iter().map(ContactResponse::from).collect(),
        })
    }

    pub async fn update_status(&self, request: UpdateContactRequest) -> Result<ContactUpdatedResponse, AppError> {
        let status = request
            .parsed_status()
            .ok_or_else(|| AppError::ValidationError("Invalid status".to_string()))?;

        let contact = self
            .contact_repo
            .update_status(&request.id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("Contact not found".to_string()))?;

        log::info!("Contact {} marked {}", request.id, status);

        Ok(ContactUpdatedResponse {
            success: true,
            message: "Contact updated successfully".to_string(),
            contact: ContactResponse::from(contact),
        })
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if !self.contact_repo.delete(id).await? {
            return Err(AppError::NotFound("Contact not found".to_string()));
        }

        log::info!("🗑️ Contact {} deleted", id);
        Ok(())
    }
}

