//! Beacon bodies sent by the browser analytics script.
//!
//! These endpoints keep the script's own error contract
//! (`{"success": false, "error": "..."}`), so required fields are checked by
//! hand instead of through `validator`.

use chrono::{DateTime, Utc};
use mongodb::bson;
use serde::Deserialize;
use crate::core::errors::AppError;
use crate::domain::entities::{Device, DeviceType, Interactions, PageView};
use crate::domain::models::analytics::{ReportRange, VisitorSighting};
use crate::utils::string_utils::deserialize_optional_string;

pub const MISSING_FIELDS: &str = "Missing required fields";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceInfo {
    #[serde(rename = "type", default, deserialize_with = "deserialize_optional_string")]
    pub device_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFingerprintRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub fingerprint_hash: Option<String>,
    /// Raw signal map; anything but a JSON object counts as missing.
    #[serde(default)]
    pub components: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub device: Option<DeviceInfo>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub page: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub referrer: Option<String>,
}

impl RecordFingerprintRequest {
    /// `ValidationError` when the hash or the components are missing.
    pub fn into_sighting(self) -> Result<VisitorSighting, AppError> {
        let fingerprint_hash = self
            .fingerprint_hash
            .ok_or_else(|| AppError::ValidationError(MISSING_FIELDS.to_string()))?;

        let components = match self.components {
            Some(value @ serde_json::Value::Object(_)) => bson::to_document(&value)
                .map_err(|e| AppError::InternalError(format!("Invalid components: {}", e)))?,
            _ => return Err(AppError::ValidationError(MISSING_FIELDS.to_string())),
        };

        let device = self.device.and_then(|info| {
            info.device_type.map(|device_type| Device {
                device_type: DeviceType::parse(&device_type),
                brand: info.brand,
                model: info.model,
            })
        });

        Ok(VisitorSighting {
            fingerprint_hash,
            components,
            user_agent: self.user_agent,
            device,
            page: self.page,
            referrer: self.referrer,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageViewRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub fingerprint_hash: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub page: Option<String>,
    /// Seconds spent on the page.
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub exit_page: Option<String>,
    #[serde(default)]
    pub interactions: Option<Interactions>,
}

impl PageViewRequest {
    /// Splits the beacon into the visitor hash and the page view.
    pub fn into_page_view(self) -> Result<(String, PageView), AppError> {
        match (self.fingerprint_hash, self.page) {
            (Some(hash), Some(page)) => Ok((
                hash,
                PageView {
                    page,
                    duration: self.duration,
                    exit_page: self.exit_page,
                    interactions: self.interactions,
                },
            )),
            _ => Err(AppError::ValidationError(MISSING_FIELDS.to_string())),
        }
    }
}

/// `GET /api/v1/analytics?start=&end=` with RFC 3339 bounds.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub start: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub end: Option<String>,
}

impl AnalyticsQuery {
    pub fn range(&self, now: DateTime<Utc>) -> Result<ReportRange, AppError> {
        let start = self.start.as_deref().map(parse_bound).transpose()?;
        let end = self.end.as_deref().map(parse_bound).transpose()?;
        ReportRange::resolve(start, end, now)
    }
}

fn parse_bound(value: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|_| AppError::ValidationError(format!("Invalid date: {}", value)))
}
