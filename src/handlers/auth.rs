use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use validator::Validate;
use crate::config::JwtConfig;
use crate::core::errors::AppError;
use crate::domain::dto::users::{AuthResponse, CurrentUserResponse, LoginRequest, RegisterRequest, UserResponse};
use crate::domain::dto::MessageResponse;
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::auth::{LoginThrottleService, TokenService};
use crate::services::users::UserService;

#[post("/login")]
pub async fn login(
    req: HttpRequest,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    LoginThrottleService::instance().check(&client_key(&req))?;

    payload.validate()?;

    let user = UserService::instance().verify_credentials(&payload).await?;
    let token = TokenService::instance().generate_token(&user)?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(token.clone()))
        .json(AuthResponse {
            success: true,
            message: "Login successful".to_string(),
            token,
            user: UserResponse::from(user),
        }))
}

#[post("/register")]
pub async fn register(payload: web::Json<RegisterRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = UserService::instance().register(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

#[get("/me")]
pub async fn current_user(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let profile = UserService::instance().get_user(&user.user_id).await?;

    Ok(HttpResponse::Ok().json(CurrentUserResponse {
        success: true,
        user: profile,
    }))
}

#[post("/logout")]
pub async fn logout() -> HttpResponse {
    let mut cookie = session_cookie(String::new());
    cookie.make_removal();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(MessageResponse::ok("Logged out successfully"))
}

/// First `X-Forwarded-For` entry, then the peer address.
pub(crate) fn client_key(req: &HttpRequest) -> String {
    req.headers()
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
        .or_else(|| req.peer_addr().map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(JwtConfig::cookie_name(), token)
        .path("/")
        .http_only(true)
        .secure(JwtConfig::secure_cookies())
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::days(JwtConfig::expiration_days()))
        .finish()
}
