use serde::Serialize;
use crate::domain::entities::{Contact, ContactStatus};
use crate::utils::time_utils::to_iso_string;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub status: ContactStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint_hash: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            message: contact.message,
            status: contact.status,
            fingerprint_hash: contact.fingerprint_hash,
            created_at: to_iso_string(contact.created_at),
            updated_at: to_iso_string(contact.updated_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContactCreatedResponse {
    pub success: bool,
    pub message: String,
    pub contact: ContactResponse,
}

pub type ContactUpdatedResponse = ContactCreatedResponse;

#[derive(Debug, Serialize)]
pub struct ContactListResponse {
    pub success: bool,
    pub contacts: Vec<ContactResponse>,
}
