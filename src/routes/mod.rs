//! Route table.
//!
//! Site documents (`/sitemap.xml`, `/robots.txt`, `/health`) live at the
//! root. Everything else is mounted under `/api/v1` behind
//! [`AuthMiddleware::optional`], which attaches the caller when a valid
//! session token is present; access rules are enforced per handler by the
//! `AdminUser` and `AuthenticatedUser` extractors.
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new().configure(configure_all_routes);
//! ```

use actix_web::web;
use crate::core::errors::AppError;
use crate::handlers;
use crate::middlewares::AuthMiddleware;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    configure_extractors(cfg);
    configure_site_routes(cfg);

    cfg.service(
        web::scope("/api/v1")
            .wrap(AuthMiddleware::optional())
            .configure(configure_auth_routes)
            .configure(configure_contact_routes)
            .configure(configure_review_routes)
            .configure(configure_faq_routes)
            .configure(configure_analytics_routes),
    );
}

/// Malformed bodies and query strings answer with the regular error envelope.
fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("Invalid request body: {}", err)).into()
    }));
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("Invalid query string: {}", err)).into()
    }));
}

fn configure_site_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::site::sitemap)
        .service(handlers::site::robots)
        .service(handlers::site::health_check);
}

/// - `POST /api/v1/register`
/// - `POST /api/v1/login`
/// - `GET /api/v1/me`
/// - `POST /api/v1/logout`
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::auth::register)
        .service(handlers::auth::login)
        .service(handlers::auth::current_user)
        .service(handlers::auth::logout);
}

fn configure_contact_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::contacts::create_contact)
        .service(handlers::contacts::list_contacts)
        .service(handlers::contacts::update_contact)
        .service(handlers::contacts::delete_contact);
}

fn configure_review_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::reviews::get_reviews)
        .service(handlers::reviews::create_review)
        .service(handlers::reviews::update_review)
        .service(handlers::reviews::delete_review);
}

fn configure_faq_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::faqs::get_faqs)
        .service(handlers::faqs::create_faq)
        .service(handlers::faqs::update_faq)
        .service(handlers::faqs::delete_faq);
}

fn configure_analytics_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::analytics::record_fingerprint)
        .service(handlers::analytics::record_page_view)
        .service(handlers::analytics::analytics_report);
}
