use std::future::{ready, Ready};
use std::rc::Rc;
use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// Attaches the caller identity when a valid token is present.
///
/// Tokens are read from `Authorization: Bearer <token>` first, then from the
/// `auth_token` cookie set at login.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthMiddleware;

impl AuthMiddleware {
    pub fn optional() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{get, test, web, App, HttpResponse};
    use actix_web::http::StatusCode;
    use actix_web::cookie::Cookie;
    use mongodb::bson::oid::ObjectId;
    use crate::config::JwtConfig;
    use crate::domain::entities::User;
    use crate::domain::models::auth::{AdminUser, OptionalUser};
    use crate::services::auth::TokenService;

    #[get("/whoami")]
    async fn whoami(user: OptionalUser) -> HttpResponse {
        match user.0 {
            Some(user) => HttpResponse::Ok().body(user.email),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    #[get("/admin-only")]
    async fn admin_only(_admin: AdminUser) -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    fn token(is_admin: bool) -> String {
        let mut user = User::new_admin(
            "Owner".to_string(),
            "owner@example.com".to_string(),
            "hash".to_string(),
        );
        user.id = Some(ObjectId::new());
        user.is_admin = is_admin;
        TokenService::with_secret(JwtConfig::secret()).generate_token(&user).unwrap()
    }

    #[actix_web::test]
    async fn test_bearer_token_identifies_caller() {
        let app = test::init_service(
            App::new().service(web::scope("").wrap(AuthMiddleware::optional()).service(whoami)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {}", token(true))))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "owner@example.com");
    }

    #[actix_web::test]
    async fn test_cookie_token_identifies_caller() {
        let app = test::init_service(
            App::new().service(web::scope("").wrap(AuthMiddleware::optional()).service(whoami)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .cookie(Cookie::new(JwtConfig::cookie_name(), token(true)))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "owner@example.com");
    }

    #[actix_web::test]
    async fn test_invalid_token_is_anonymous() {
        let app = test::init_service(
            App::new().service(web::scope("").wrap(AuthMiddleware::optional()).service(whoami)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", "Bearer not-a-jwt"))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "anonymous");
    }

    #[actix_web::test]
    async fn test_admin_route_statuses() {
        let app = test::init_service(
            App::new().service(web::scope("").wrap(AuthMiddleware::optional()).service(admin_only)),
        )
        .await;

        let anonymous = test::TestRequest::get().uri("/admin-only").to_request();
        assert_eq!(test::call_service(&app, anonymous).await.status(), StatusCode::UNAUTHORIZED);

        let member = test::TestRequest::get()
            .uri("/admin-only")
            .insert_header(("Authorization", format!("Bearer {}", token(false))))
            .to_request();
        assert_eq!(test::call_service(&app, member).await.status(), StatusCode::FORBIDDEN);

        let admin = test::TestRequest::get()
            .uri("/admin-only")
            .insert_header(("Authorization", format!("Bearer {}", token(true))))
            .to_request();
        assert_eq!(test::call_service(&app, admin).await.status(), StatusCode::OK);
    }
}
