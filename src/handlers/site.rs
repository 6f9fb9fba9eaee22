use actix_web::http::header::ContentType;
use actix_web::{get, HttpResponse};
use chrono::Utc;
use serde_json::json;
use crate::services::site::SiteService;

#[get("/sitemap.xml")]
pub async fn sitemap() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::xml())
        .body(SiteService::instance().sitemap_xml(Utc::now()))
}

#[get("/robots.txt")]
pub async fn robots() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(SiteService::instance().robots_txt())
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
