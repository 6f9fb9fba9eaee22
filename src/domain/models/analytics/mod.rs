pub mod sighting;
pub mod report;

pub use report::{
    AnalyticsReport, DailyActivity, DeviceBreakdown, PageStats, RecentVisitor, ReportRange,
    VisitorStats,
};
pub use sighting::VisitorSighting;
