//! Traffic report for the admin dashboard.
//!
//! Aggregation runs in memory over the visitors seen inside the requested
//! range; the site's traffic is small enough that a single query plus a fold
//! is cheaper to reason about than an aggregation pipeline.

use std::collections::{BTreeMap, HashMap, HashSet};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use crate::core::errors::AppError;
use crate::domain::entities::{DeviceType, Thumbprint};
use crate::utils::time_utils::{to_chrono, to_iso_string};

const TOP_PAGES: usize = 10;
const RECENT_VISITORS: usize = 10;
const ACTIVITY_DAYS: i64 = 30;

/// Inclusive `[start, end]` window of a report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReportRange {
    /// Missing `end` means now; missing `start` means 30 days before `end`.
    pub fn resolve(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<Self, AppError> {
        let end = end.unwrap_or(now);
        let start = start.unwrap_or(end - Duration::days(ACTIVITY_DAYS));

        if start > end {
            return Err(AppError::ValidationError(
                "Start date must be before end date".to_string(),
            ));
        }

        Ok(Self { start, end })
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at <= self.end
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorStats {
    pub total_visitors: usize,
    pub new_visitors: usize,
    pub returning_visitors: usize,
    /// Seconds, rounded.
    pub average_visit_duration: i64,
    pub total_page_views: usize,
    pub average_page_views_per_visit: f64,
    pub converted_visitors: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceBreakdown {
    pub desktop: usize,
    pub tablet: usize,
    pub mobile: usize,
    pub other: usize,
}

impl DeviceBreakdown {
    fn count(&mut self, device: DeviceType) {
        match device {
            DeviceType::Desktop => self.desktop += 1,
            DeviceType::Tablet => self.tablet += 1,
            DeviceType::Mobile => self.mobile += 1,
            DeviceType::Other => self.other += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStats {
    pub page: String,
    pub views: usize,
    pub average_duration: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivity {
    /// `YYYY-MM-DD`, UTC.
    pub date: String,
    pub visitors: usize,
    pub page_views: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentVisitor {
    pub fingerprint_hash: String,
    pub device: String,
    pub last_seen: String,
    pub visit_count: i64,
    pub last_page: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub visitor_stats: VisitorStats,
    pub device_breakdown: DeviceBreakdown,
    pub top_pages: Vec<PageStats>,
    pub visitor_activity: Vec<DailyActivity>,
    pub recent_visitors: Vec<RecentVisitor>,
}

#[derive(Default)]
struct PageTotals {
    views: usize,
    duration: f64,
}

#[derive(Default)]
struct DayTotals<'a> {
    visitors: HashSet<&'a str>,
    page_views: usize,
}

impl AnalyticsReport {
    /// Builds the report from the visitors whose `lastSeen` falls in `range`.
    ///
    /// Only visits stamped inside the range count towards page views,
    /// durations and daily activity.
    pub fn from_thumbprints(thumbprints: &[Thumbprint], range: ReportRange) -> Self {
        let total_visitors = thumbprints.len();
        let new_visitors = thumbprints
            .iter()
            .filter(|t| range.contains(to_chrono(t.first_seen)))
            .count();
        let converted_visitors = thumbprints.iter().filter(|t| t.has_converted()).count();

        let mut total_duration = 0.0;
        let mut total_page_views = 0;
        let mut pages: HashMap<&str, PageTotals> = HashMap::new();
        let mut days: BTreeMap<String, DayTotals> = BTreeMap::new();
        let mut device_breakdown = DeviceBreakdown::default();

        for offset in 0..ACTIVITY_DAYS {
            days.entry(day_key(range.end - Duration::days(offset))).or_default();
        }

        for thumbprint in thumbprints {
            device_breakdown.count(thumbprint.device.device_type);

            for visit in &thumbprint.visits {
                let at = to_chrono(visit.timestamp);
                if !range.contains(at) {
                    continue;
                }

                let duration = visit.duration.unwrap_or(0.0);
                total_page_views += 1;
                total_duration += duration;

                let page = pages.entry(visit.page.as_str()).or_default();
                page.views += 1;
                page.duration += duration;

                let day = days.entry(day_key(at)).or_default();
                day.visitors.insert(thumbprint.fingerprint_hash.as_str());
                day.page_views += 1;
            }
        }

        let (average_visit_duration, average_page_views_per_visit) = if total_visitors > 0 {
            let visitors = total_visitors as f64;
            (
                (total_duration / visitors).round() as i64,
                (total_page_views as f64 / visitors * 10.0).round() / 10.0,
            )
        } else {
            (0, 0.0)
        };

        let mut top_pages: Vec<PageStats> = pages
            .into_iter()
            .map(|(page, totals)| PageStats {
                page: page.to_string(),
                views: totals.views,
                average_duration: (totals.duration / totals.views as f64).round() as i64,
            })
            .collect();
        // Ties are ordered by page so the output is stable.
        top_pages.sort_by(|a, b| b.views.cmp(&a.views).then_with(|| a.page.cmp(&b.page)));
        top_pages.truncate(TOP_PAGES);

        let visitor_activity = days
            .into_iter()
            .map(|(date, totals)| DailyActivity {
                date,
                visitors: totals.visitors.len(),
                page_views: totals.page_views,
            })
            .collect();

        let mut by_recency: Vec<&Thumbprint> = thumbprints.iter().collect();
        by_recency.sort_by(|a, b| b.last_seen.cmp(&a.last_seen));
        let recent_visitors = by_recency
            .into_iter()
            .take(RECENT_VISITORS)
            .map(|t| RecentVisitor {
                fingerprint_hash: t.fingerprint_hash.clone(),
                device: t.device.device_type.as_str().to_string(),
                last_seen: to_iso_string(t.last_seen),
                visit_count: t.visit_count,
                last_page: t
                    .latest_visit()
                    .map(|v| v.page.clone())
                    .unwrap_or_else(|| "/".to_string()),
            })
            .collect();

        Self {
            visitor_stats: VisitorStats {
                total_visitors,
                new_visitors,
                returning_visitors: total_visitors - new_visitors,
                average_visit_duration,
                total_page_views,
                average_page_views_per_visit,
                converted_visitors,
            },
            device_breakdown,
            top_pages,
            visitor_activity,
            recent_visitors,
        }
    }
}

fn day_key(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}
