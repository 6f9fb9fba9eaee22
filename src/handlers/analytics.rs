//! Visitor analytics.
//!
//! The two beacon endpoints are called by the site's tracking script, often
//! through `navigator.sendBeacon` with a `text/plain` body, so they read the
//! raw bytes and answer with `{success, error}` instead of the usual error
//! envelope.

use actix_web::{get, post, web, HttpResponse};
use chrono::Utc;
use crate::core::errors::AppError;
use crate::domain::dto::analytics::{
    AnalyticsFailure, AnalyticsQuery, PageViewRequest, RecordFingerprintRequest,
};
use crate::domain::dto::MessageResponse;
use crate::domain::models::auth::AdminUser;
use crate::services::analytics::AnalyticsService;

const FINGERPRINT_FAILED: &str = "Failed to process fingerprint";
const PAGE_VIEW_FAILED: &str = "Failed to record page view";

#[post("/analytics/fingerprint")]
pub async fn record_fingerprint(body: web::Bytes) -> HttpResponse {
    let request: RecordFingerprintRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            log::error!("Error processing fingerprint: {}", e);
            return HttpResponse::InternalServerError().json(AnalyticsFailure::new(FINGERPRINT_FAILED));
        }
    };

    let sighting = match request.into_sighting() {
        Ok(sighting) => sighting,
        Err(AppError::ValidationError(message)) => {
            return HttpResponse::BadRequest().json(AnalyticsFailure::new(message));
        }
        Err(e) => {
            log::error!("Error processing fingerprint: {}", e);
            return HttpResponse::InternalServerError().json(AnalyticsFailure::new(FINGERPRINT_FAILED));
        }
    };

    match AnalyticsService::instance().record_sighting(sighting).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("Error processing fingerprint: {}", e);
            HttpResponse::InternalServerError().json(AnalyticsFailure::new(FINGERPRINT_FAILED))
        }
    }
}

/// Unexpected failures still answer 200: a beacon cannot retry.
#[post("/analytics/pageview")]
pub async fn record_page_view(body: web::Bytes) -> HttpResponse {
    let request: PageViewRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            log::error!("Error recording page view: {}", e);
            return HttpResponse::Ok().json(AnalyticsFailure::new(PAGE_VIEW_FAILED));
        }
    };

    let (fingerprint_hash, view) = match request.into_page_view() {
        Ok(parts) => parts,
        Err(e) => return HttpResponse::BadRequest().json(AnalyticsFailure::new(e.public_message())),
    };

    match AnalyticsService::instance()
        .record_page_view(&fingerprint_hash, view)
        .await
    {
        Ok(message) => HttpResponse::Ok().json(MessageResponse::ok(message)),
        Err(AppError::NotFound(message)) => HttpResponse::NotFound().json(AnalyticsFailure::new(message)),
        Err(e) => {
            log::error!("Error recording page view: {}", e);
            HttpResponse::Ok().json(AnalyticsFailure::new(PAGE_VIEW_FAILED))
        }
    }
}

/// Traffic report for the admin dashboard.
#[get("/analytics")]
pub async fn analytics_report(
    _admin: AdminUser,
    query: web::Query<AnalyticsQuery>,
) -> Result<HttpResponse, AppError> {
    let range = query.range(Utc::now())?;

    let response = AnalyticsService::instance().report(range).await?;

    Ok(HttpResponse::Ok().json(response))
}
