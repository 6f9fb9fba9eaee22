use std::sync::Arc;
use singleton_macro::service;
use mongodb::bson::DateTime;
use crate::core::errors::AppError;
use crate::domain::dto::analytics::{AnalyticsReportResponse, FingerprintResponse};
use crate::domain::entities::{PageView, PageViewOutcome};
use crate::domain::models::analytics::{AnalyticsReport, ReportRange, VisitorSighting};
use crate::repositories::analytics::ThumbprintRepository;
use crate::utils::time_utils::from_chrono;

#[service(name = "analytics")]
pub struct AnalyticsService {
    thumbprint_repo: Arc<ThumbprintRepository>,
}

impl AnalyticsService {
    pub async fn record_sighting(&self, sighting: VisitorSighting) -> Result<FingerprintResponse, AppError> {
        let is_new_visitor = self
            .thumbprint_repo
            .upsert_sighting(&sighting, DateTime::now())
            .await?;

        if is_new_visitor {
            log::info!("👣 New visitor {}", sighting.fingerprint_hash);
        }

        Ok(FingerprintResponse {
            success: true,
            is_new_visitor,
            fingerprint_hash: sighting.fingerprint_hash,
        })
    }

    /// Closes the open visit the beacon refers to, or records a new one.
    ///
    /// Returns the message for the response body.
    pub async fn record_page_view(&self, fingerprint_hash: &str, view: PageView) -> Result<&'static str, AppError> {
        let mut thumbprint = self
            .thumbprint_repo
            .find_by_hash(fingerprint_hash)
            .await?
            .ok_or_else(|| AppError::NotFound("Fingerprint not found".to_string()))?;

        match thumbprint.apply_page_view(view, DateTime::now()) {
            PageViewOutcome::Updated { index, visit } => {
                self.thumbprint_repo
                    .replace_visit(fingerprint_hash, index, &visit)
                    .await?;
                Ok("Page view updated")
            }
            PageViewOutcome::Appended(visit) => {
                self.thumbprint_repo.append_visit(fingerprint_hash, &visit).await?;
                Ok("New page view recorded")
            }
        }
    }

    pub async fn report(&self, range: ReportRange) -> Result<AnalyticsReportResponse, AppError> {
        let thumbprints = self
            .thumbprint_repo
            .find_seen_between(from_chrono(range.start), from_chrono(range.end))
            .await?;

        log::debug!(
            "Building analytics report over {} visitors ({} - {})",
            thumbprints.len(),
            range.start,
            range.end
        );

        Ok(AnalyticsReportResponse {
            success: true,
            analytics: AnalyticsReport::from_thumbprints(&thumbprints, range),
        })
    }
}

