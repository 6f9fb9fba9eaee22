use serde::Serialize;
use crate::domain::models::analytics::AnalyticsReport;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintResponse {
    pub success: bool,
    pub is_new_visitor: bool,
    pub fingerprint_hash: String,
}

/// Error body of the beacon endpoints.
#[derive(Debug, Serialize)]
pub struct AnalyticsFailure {
    pub success: bool,
    pub error: String,
}

impl AnalyticsFailure {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyticsReportResponse {
    pub success: bool,
    pub analytics: AnalyticsReport,
}
