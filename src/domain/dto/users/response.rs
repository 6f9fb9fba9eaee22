use serde::Serialize;
use crate::domain::entities::User;

/// Public view of an account. Never carries the password hash.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            name: user.name,
            email: user.email,
            is_admin: user.is_admin,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub success: bool,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_user_response_hides_password() {
        let mut user = User::new_admin(
            "Avery Cole".to_string(),
            "avery@example.com".to_string(),
            "$2b$04$secret-hash".to_string(),
        );
        user.id = Some(ObjectId::new());

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert_eq!(json["isAdmin"], true);
        assert_eq!(json["email"], "avery@example.com");
        assert!(json.get("password").is_none());
        assert!(!json.to_string().contains("secret-hash"));
    }
}
