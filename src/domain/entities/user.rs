use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// Site administrator account.
///
/// `password_hash` holds a bcrypt hash and is stored under `password`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    /// Lowercased, unique
    pub email: String,
    #[serde(rename = "password")]
    pub password_hash: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default = "DateTime::now")]
    pub created_at: DateTime,
    #[serde(default = "DateTime::now")]
    pub updated_at: DateTime,
}

impl User {
    /// Every account created through registration administers the site.
    pub fn new_admin(name: String, email: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name,
            email,
            password_hash,
            is_admin: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn test_new_admin() {
        let user = User::new_admin(
            "Jordan Reyes".to_string(),
            "jordan@example.com".to_string(),
            "$2b$04$hash".to_string(),
        );

        assert!(user.is_admin);
        assert!(user.id.is_none());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_stored_field_names() {
        let user = User::new_admin(
            "Jordan Reyes".to_string(),
            "jordan@example.com".to_string(),
            "$2b$04$hash".to_string(),
        );

        let doc = bson::to_document(&user).unwrap();
        assert_eq!(doc.get_str("password").unwrap(), "$2b$04$hash");
        assert!(doc.get_bool("isAdmin").unwrap());
        assert!(doc.contains_key("createdAt"));
        assert!(!doc.contains_key("_id"));
        assert!(!doc.contains_key("password_hash"));
    }
}
