use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use singleton_macro::service;
use crate::config::JwtConfig;
use crate::core::errors::AppError;
use crate::domain::entities::User;
use crate::domain::models::token::TokenClaims;

/// HMAC key for session tokens; defaults to the configured secret.
struct SigningSecret(String);

impl Default for SigningSecret {
    fn default() -> Self {
        Self(JwtConfig::secret())
    }
}

#[service(name = "token")]
pub struct TokenService {
    secret: SigningSecret,
}

impl TokenService {
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: SigningSecret(secret.into()),
        }
    }

    pub fn generate_token(&self, user: &User) -> Result<String, AppError> {
        let user_id = user
            .id_string()
            .ok_or_else(|| AppError::InternalError("User has no id".to_string()))?;

        let now = Utc::now();
        let expiration = now + Duration::days(JwtConfig::expiration_days());

        let claims = TokenClaims {
            sub: user_id.clone(),
            id: user_id,
            email: user.email.clone(),
            is_admin: user.is_admin,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        self.encode_claims(&claims)
    }

    pub fn encode_claims(&self, claims: &TokenClaims) -> Result<String, AppError> {
        let encoding_key = EncodingKey::from_secret(self.secret.0.as_bytes());

        encode(&Header::default(), claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("Token generation failed: {}", e)))
    }

    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        let decoding_key = DecodingKey::from_secret(self.secret.0.as_bytes());

        decode::<TokenClaims>(token, &decoding_key, &Validation::default())
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("Token expired".to_string())
                }
                _ => AppError::AuthenticationError("Invalid token".to_string()),
            })
    }

    /// `Bearer <token>` → `<token>`.
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Option<&'a str> {
        auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}
