use std::fmt;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// Follow-up state of a contact request, managed from the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    New,
    Contacted,
    Resolved,
    Archived,
}

impl ContactStatus {
    pub const ALL: [ContactStatus; 4] = [
        ContactStatus::New,
        ContactStatus::Contacted,
        ContactStatus::Resolved,
        ContactStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::New => "new",
            ContactStatus::Contacted => "contacted",
            ContactStatus::Resolved => "resolved",
            ContactStatus::Archived => "archived",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message submitted through the public contact form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    #[serde(default)]
    pub status: ContactStatus,
    /// Visitor that submitted the form, when the browser reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint_hash: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Contact {
    pub fn new(
        name: String,
        email: String,
        phone: String,
        message: String,
        fingerprint_hash: Option<String>,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name,
            email,
            phone,
            message,
            status: ContactStatus::New,
            fingerprint_hash,
            created_at: now,
            updated_at: now,
        }
    }
}
