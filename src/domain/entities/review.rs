use std::fmt;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::utils::number_utils::deserialize_whole_number;

/// Platform a customer review was originally posted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewSource {
    Google,
    Yelp,
    Facebook,
    Instagram,
    Website,
    YouTube,
    Other,
}

impl ReviewSource {
    pub const ALL: [ReviewSource; 7] = [
        ReviewSource::Google,
        ReviewSource::Yelp,
        ReviewSource::Facebook,
        ReviewSource::Instagram,
        ReviewSource::Website,
        ReviewSource::YouTube,
        ReviewSource::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewSource::Google => "Google",
            ReviewSource::Yelp => "Yelp",
            ReviewSource::Facebook => "Facebook",
            ReviewSource::Instagram => "Instagram",
            ReviewSource::Website => "Website",
            ReviewSource::YouTube => "YouTube",
            ReviewSource::Other => "Other",
        }
    }

    /// Exact, case-sensitive match on the display name.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|source| source.as_str() == value)
    }
}

impl fmt::Display for ReviewSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    /// 1..=5 stars
    #[serde(deserialize_with = "deserialize_whole_number")]
    pub rating: i32,
    pub comment: String,
    pub source: ReviewSource,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Review {
    pub fn new(name: String, rating: i32, comment: String, source: ReviewSource) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name,
            rating,
            comment,
            source,
            created_at: now,
            updated_at: now,
        }
    }
}
