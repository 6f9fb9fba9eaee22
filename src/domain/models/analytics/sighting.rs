use mongodb::bson::Document;
use crate::domain::entities::Device;

/// A page load reported by the browser fingerprint script.
///
/// Built from a validated request; the repository turns it into a single
/// atomic upsert on the `thumbprints` collection.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitorSighting {
    pub fingerprint_hash: String,
    pub components: Document,
    pub user_agent: Option<String>,
    /// Only set when the browser reported a device type.
    pub device: Option<Device>,
    pub page: Option<String>,
    pub referrer: Option<String>,
}
