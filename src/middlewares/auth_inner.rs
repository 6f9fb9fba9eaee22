use std::rc::Rc;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use crate::config::JwtConfig;
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::auth::TokenService;

pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let token_service = TokenService::instance();

            if let Some(token) = extract_token(&req, &token_service) {
                match token_service.verify_token(&token) {
                    Ok(claims) => {
                        let user = AuthenticatedUser::from(claims);
                        log::debug!("Authenticated request from {}", user.email);
                        req.extensions_mut().insert(user);
                    }
                    Err(e) => log::debug!("Ignoring session token: {}", e),
                }
            }

            service.call(req).await
        })
    }
}

/// Bearer header wins over the session cookie.
fn extract_token(req: &ServiceRequest, token_service: &TokenService) -> Option<String> {
    let from_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| token_service.extract_bearer_token(h))
        .map(str::to_string);

    from_header.or_else(|| {
        req.cookie(JwtConfig::cookie_name())
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    })
}
