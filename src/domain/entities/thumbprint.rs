//! Per-visitor analytics record.
//!
//! A thumbprint is keyed by the browser fingerprint hash computed client-side.
//! Every page load appends a [`Visit`]; when the visitor leaves the page the
//! browser beacons a page view that closes the matching visit with its
//! duration and interaction counters.

use mongodb::bson::{oid::ObjectId, DateTime, Document};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Desktop,
    Tablet,
    Mobile,
    #[default]
    Other,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Desktop => "desktop",
            DeviceType::Tablet => "tablet",
            DeviceType::Mobile => "mobile",
            DeviceType::Other => "other",
        }
    }

    /// Case-insensitive; unknown names become `Other`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "desktop" => DeviceType::Desktop,
            "tablet" => DeviceType::Tablet,
            "mobile" => DeviceType::Mobile,
            _ => DeviceType::Other,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Device {
    #[serde(rename = "type", default)]
    pub device_type: DeviceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

/// Engagement counters reported when the visitor leaves a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interactions {
    #[serde(default)]
    pub clicks: i64,
    /// Deepest scroll position reached, in percent.
    #[serde(default)]
    pub scroll_depth: f64,
    #[serde(default)]
    pub form_interactions: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub timestamp: DateTime,
    #[serde(default = "root_page")]
    pub page: String,
    /// Time spent on the page; unset until the page view beacon arrives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactions: Option<Interactions>,
}

fn root_page() -> String {
    "/".to_string()
}

impl Visit {
    /// Visit opened by a fingerprint sighting.
    pub fn opened(timestamp: DateTime, page: Option<String>, referrer: Option<String>) -> Self {
        Self {
            timestamp,
            page: page.unwrap_or_else(root_page),
            duration: None,
            referrer,
            exit_page: None,
            interactions: None,
        }
    }

    /// A zero duration counts as not yet measured.
    pub fn is_open(&self) -> bool {
        self.duration.is_none_or(|d| d == 0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversion {
    #[serde(default)]
    pub has_converted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_date: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbprint {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub fingerprint_hash: String,
    /// Raw signal values reported by the browser script.
    #[serde(default)]
    pub components: Document,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub device: Device,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default)]
    pub visits: Vec<Visit>,
    pub first_seen: DateTime,
    pub last_seen: DateTime,
    #[serde(default = "first_visit")]
    pub visit_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion: Option<Conversion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<String>>,
}

fn first_visit() -> i64 {
    1
}

/// Page view beacon, already normalised by the request layer.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub page: String,
    pub duration: Option<f64>,
    pub exit_page: Option<String>,
    pub interactions: Option<Interactions>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageViewOutcome {
    /// An open visit at `index` was closed.
    Updated { index: usize, visit: Visit },
    /// No open visit matched; a closed visit was appended.
    Appended(Visit),
}

impl Thumbprint {
    pub fn has_converted(&self) -> bool {
        self.conversion.as_ref().is_some_and(|c| c.has_converted)
    }

    /// Most recent visit by timestamp.
    pub fn latest_visit(&self) -> Option<&Visit> {
        self.visits.iter().max_by_key(|v| v.timestamp)
    }

    /// Records a page view beacon against this visitor.
    ///
    /// The most recent open visit to the same page is closed. When there is
    /// none (the sighting was lost, or the page was already closed) a new,
    /// already closed visit stamped `now` is appended instead. A missing
    /// duration is recorded as 0 and the exit page defaults to the page.
    pub fn apply_page_view(&mut self, view: PageView, now: DateTime) -> PageViewOutcome {
        let duration = view.duration.unwrap_or(0.0);
        let exit_page = view.exit_page.unwrap_or_else(|| view.page.clone());

        let open_index = self
            .visits
            .iter()
            .rposition(|visit| visit.page == view.page && visit.is_open());

        match open_index {
            Some(index) => {
                let visit = &mut self.visits[index];
                visit.duration = Some(duration);
                visit.exit_page = Some(exit_page);
                if let Some(interactions) = view.interactions {
                    visit.interactions = Some(interactions);
                }
                PageViewOutcome::Updated {
                    index,
                    visit: visit.clone(),
                }
            }
            None => {
                let visit = Visit {
                    timestamp: now,
                    page: view.page,
                    duration: Some(duration),
                    referrer: None,
                    exit_page: Some(exit_page),
                    interactions: view.interactions,
                };
                self.visits.push(visit.clone());
                PageViewOutcome::Appended(visit)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    fn at(millis: i64) -> DateTime {
        DateTime::from_millis(millis)
    }

    fn thumbprint(visits: Vec<Visit>) -> Thumbprint {
        Thumbprint {
            id: Some(ObjectId::new()),
            fingerprint_hash: "fp-abc123".to_string(),
            components: bson::doc! { "screen": "1920x1080" },
            user_agent: None,
            device: Device::default(),
            location: None,
            visits,
            first_seen: at(0),
            last_seen: at(0),
            visit_count: 1,
            conversion: None,
            segments: None,
        }
    }

    fn view(page: &str, duration: Option<f64>) -> PageView {
        PageView {
            page: page.to_string(),
            duration,
            exit_page: None,
            interactions: None,
        }
    }

    #[test]
    fn test_closes_matching_open_visit() {
        let mut tp = thumbprint(vec![Visit::opened(at(1_000), Some("/contact".to_string()), None)]);

        let outcome = tp.apply_page_view(view("/contact", Some(42.0)), at(5_000));

        match outcome {
            PageViewOutcome::Updated { index, visit } => {
                assert_eq!(index, 0);
                assert_eq!(visit.duration, Some(42.0));
                assert_eq!(visit.exit_page.as_deref(), Some("/contact"));
                assert_eq!(visit.timestamp, at(1_000));
            }
            other => panic!("expected update, got {:?}", other),
        }
        assert_eq!(tp.visits.len(), 1);
    }

    #[test]
    fn test_closes_most_recent_open_visit() {
        let mut tp = thumbprint(vec![
            Visit::opened(at(1_000), Some("/faq".to_string()), None),
            Visit::opened(at(2_000), Some("/".to_string()), None),
            Visit::opened(at(3_000), Some("/faq".to_string()), None),
        ]);

        let outcome = tp.apply_page_view(view("/faq", Some(10.0)), at(4_000));

        assert!(matches!(outcome, PageViewOutcome::Updated { index: 2, .. }));
        assert!(tp.visits[0].is_open());
        assert!(!tp.visits[2].is_open());
    }

    #[test]
    fn test_appends_when_no_open_visit_matches() {
        let mut closed = Visit::opened(at(1_000), Some("/faq".to_string()), None);
        closed.duration = Some(30.0);
        let mut tp = thumbprint(vec![closed]);

        let outcome = tp.apply_page_view(view("/faq", None), at(9_000));

        match outcome {
            PageViewOutcome::Appended(visit) => {
                assert_eq!(visit.timestamp, at(9_000));
                assert_eq!(visit.duration, Some(0.0));
                assert_eq!(visit.exit_page.as_deref(), Some("/faq"));
            }
            other => panic!("expected append, got {:?}", other),
        }
        assert_eq!(tp.visits.len(), 2);
    }

    #[test]
    fn test_zero_duration_visit_is_still_open() {
        let mut visit = Visit::opened(at(1_000), Some("/".to_string()), None);
        visit.duration = Some(0.0);
        assert!(visit.is_open());

        let mut tp = thumbprint(vec![visit]);
        let outcome = tp.apply_page_view(view("/", Some(12.5)), at(2_000));
        assert!(matches!(outcome, PageViewOutcome::Updated { index: 0, .. }));
    }

    #[test]
    fn test_interactions_and_exit_page_are_recorded() {
        let mut tp = thumbprint(vec![Visit::opened(at(1_000), Some("/".to_string()), None)]);

        let interactions = Interactions {
            clicks: 4,
            scroll_depth: 80.0,
            form_interactions: true,
        };
        tp.apply_page_view(
            PageView {
                page: "/".to_string(),
                duration: Some(61.0),
                exit_page: Some("/contact".to_string()),
                interactions: Some(interactions.clone()),
            },
            at(2_000),
        );

        assert_eq!(tp.visits[0].exit_page.as_deref(), Some("/contact"));
        assert_eq!(tp.visits[0].interactions, Some(interactions));
    }

    #[test]
    fn test_device_type_parse() {
        assert_eq!(DeviceType::parse("Mobile"), DeviceType::Mobile);
        assert_eq!(DeviceType::parse("tablet"), DeviceType::Tablet);
        assert_eq!(DeviceType::parse("smart-tv"), DeviceType::Other);
    }

    #[test]
    fn test_opened_visit_defaults_to_root_page() {
        let visit = Visit::opened(at(0), None, Some("https://google.com".to_string()));
        assert_eq!(visit.page, "/");
        assert_eq!(visit.referrer.as_deref(), Some("https://google.com"));
        assert!(visit.is_open());
    }

    #[test]
    fn test_reads_legacy_document() {
        let doc = bson::doc! {
            "_id": ObjectId::new(),
            "fingerprintHash": "legacy",
            "components": { "timezone": "America/Chicago" },
            "userAgent": null,
            "device": { "type": "mobile" },
            "visits": [
                { "timestamp": at(1_000), "page": "/", "referrer": null },
                { "timestamp": at(2_000), "page": "/faq", "duration": 12, "interactions": { "clicks": 2 } },
            ],
            "firstSeen": at(1_000),
            "lastSeen": at(2_000),
            "visitCount": 2,
        };

        let tp: Thumbprint = bson::from_document(doc).unwrap();
        assert_eq!(tp.device.device_type, DeviceType::Mobile);
        assert_eq!(tp.visits[1].duration, Some(12.0));
        assert_eq!(tp.visits[1].interactions.as_ref().map(|i| i.clicks), Some(2));
        assert_eq!(tp.latest_visit().map(|v| v.page.as_str()), Some("/faq"));
        assert!(!tp.has_converted());
    }
}
