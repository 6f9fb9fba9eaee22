use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::core::errors::AppError;
use crate::domain::models::token::TokenClaims;

/// Caller identity taken from a verified session token.
///
/// The auth middleware inserts it into request extensions; handlers receive
/// it through the extractors below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<TokenClaims> for AuthenticatedUser {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.id,
            email: claims.email,
            is_admin: claims.is_admin,
        }
    }
}

/// Rejects anonymous requests with 401.
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError("Unauthorized".to_string()).into())),
        }
    }
}

/// Never fails; `None` for anonymous requests.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl OptionalUser {
    pub fn is_admin(&self) -> bool {
        self.0.as_ref().is_some_and(|user| user.is_admin)
    }
}

impl FromRequest for OptionalUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(Ok(OptionalUser(user)))
    }
}

/// Guard for admin-only handlers: 401 when anonymous, 403 for non-admins.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthenticatedUser);

impl FromRequest for AdminUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let result = match req.extensions().get::<AuthenticatedUser>() {
            Some(user) if user.is_admin => Ok(AdminUser(user.clone())),
            Some(_) => Err(AppError::AuthorizationError("Admin access required".to_string()).into()),
            None => Err(AppError::AuthenticationError("Unauthorized".to_string()).into()),
        };
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    fn user(is_admin: bool) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: "65f1c0a2b3d4e5f6a7b8c9d0".to_string(),
            email: "owner@example.com".to_string(),
            is_admin,
        }
    }

    #[actix_web::test]
    async fn test_admin_extractor_accepts_admin() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(user(true));

        let admin = AdminUser::extract(&req).await.unwrap();
        assert_eq!(admin.0.email, "owner@example.com");
    }

    #[actix_web::test]
    async fn test_admin_extractor_rejects_anonymous_and_non_admin() {
        let anonymous = TestRequest::default().to_http_request();
        let err = AdminUser::extract(&anonymous).await.unwrap_err();
        assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);

        let member = TestRequest::default().to_http_request();
        member.extensions_mut().insert(user(false));
        let err = AdminUser::extract(&member).await.unwrap_err();
        assert_eq!(err.as_response_error().status_code(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_optional_user() {
        let anonymous = TestRequest::default().to_http_request();
        let optional = OptionalUser::extract(&anonymous).await.unwrap();
        assert!(optional.0.is_none());
        assert!(!optional.is_admin());

        let signed_in = TestRequest::default().to_http_request();
        signed_in.extensions_mut().insert(user(true));
        assert!(OptionalUser::extract(&signed_in).await.unwrap().is_admin());
    }
}
