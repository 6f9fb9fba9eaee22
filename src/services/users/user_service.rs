use std::sync::Arc;
use bcrypt::hash;
use singleton_macro::service;
use crate::config::{PasswordConfig, RegistrationConfig};
use crate::core::errors::AppError;
use crate::domain::dto::users::{LoginRequest, RegisterRequest, RegisterResponse, UserResponse};
use crate::domain::entities::User;
use crate::repositories::users::UserRepository;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[service(name = "user")]
pub struct UserService {
    user_repo: Arc<UserRepository>,
}

impl UserService {
    /// Creates an admin account. The request must already be validated.
    pub async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse, AppError> {
        ensure_registration_open(RegistrationConfig::enabled())?;

        let email = normalize_email(&request.email);

        let hash_start = std::time::Instant::now();
        let password_hash = hash(&request.password, PasswordConfig::bcrypt_cost())
            .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))?;
        log::debug!("Password hashing took: {:?}", hash_start.elapsed());

        let user = User::new_admin(request.name, email, password_hash);
        let created = self.user_repo.create(user).await?;

        Ok(RegisterResponse {
            success: true,
            message: "Registration successful".to_string(),
            user: UserResponse::from(created),
        })
    }

    /// Returns the user when the password matches.
    ///
    /// Unknown emails and wrong passwords fail with the same message.
    pub async fn verify_credentials(&self, request: &LoginRequest) -> Result<User, AppError> {
        let email = normalize_email(&request.email);

        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            log::warn!("Login failed: unknown email {}", email);
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        };

        let is_valid = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification failed: {}", e)))?;

        if !is_valid {
            log::warn!("Login failed: wrong password for {}", email);
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        }

        log::info!("🔑 Login: {}", email);
        Ok(user)
    }

    pub async fn get_user(&self, id: &str) -> Result<UserResponse, AppError> {
        let user = self
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(UserResponse::from(user))
    }
}

pub(crate) fn ensure_registration_open(enabled: bool) -> Result<(), AppError> {
    if enabled {
        Ok(())
    } else {
        Err(AppError::AuthorizationError("Registration is disabled".to_string()))
    }
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
