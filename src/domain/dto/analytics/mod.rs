pub mod request;
pub mod response;

pub use request::{AnalyticsQuery, DeviceInfo, PageViewRequest, RecordFingerprintRequest};
pub use response::{AnalyticsFailure, AnalyticsReportResponse, FingerprintResponse};
