use serde::{Deserialize, Serialize};

/// Session token payload.
///
/// `sub` and `id` both carry the user id; `id` and `isAdmin` are the names
/// the site's admin pages read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims {
    pub sub: String,
    pub id: String,
    pub email: String,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds)
    pub exp: i64,
}
