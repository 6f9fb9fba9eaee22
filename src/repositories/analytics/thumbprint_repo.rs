use std::sync::Arc;
use singleton_macro::repository;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{self, doc, DateTime, Document},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use crate::core::errors::{AppError, ErrorContext};
use crate::db::Database;
use crate::domain::entities::{DeviceType, Thumbprint, Visit};
use crate::domain::models::analytics::VisitorSighting;
use crate::repositories::is_duplicate_key;

pub const CONTACT_FORM_CONVERSION: &str = "contact_form";

#[repository(name = "thumbprint", collection = "thumbprints")]
pub struct ThumbprintRepository {
    db: Arc<Database>,
}

impl ThumbprintRepository {
    fn thumbprints(&self) -> Collection<Thumbprint> {
        self.collection::<Thumbprint>()
    }

    /// Records a sighting with a single upsert; returns `true` for a new visitor.
    pub async fn upsert_sighting(
        &self,
        sighting: &VisitorSighting,
        now: DateTime,
    ) -> Result<bool, AppError> {
        let filter = doc! { "fingerprintHash": sighting.fingerprint_hash.as_str() };
        let update = sighting_update(sighting, now)?;

        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::Before)
            .build();

        let previous = match self
            .thumbprints()
            .find_one_and_update(filter.clone(), update.clone())
            .with_options(options.clone())
            .await
        {
            Ok(previous) => previous,
            // Two first sightings raced on the unique index; the loser is now an update.
            Err(e) if is_duplicate_key(&e) => {
                self.thumbprints()
                    .find_one_and_update(filter, update)
                    .with_options(options)
                    .await?
            }
            Err(e) => return Err(e.into()),
        };

        Ok(previous.is_none())
    }

    pub async fn find_by_hash(&self, fingerprint_hash: &str) -> Result<Option<Thumbprint>, AppError> {
        Ok(self
            .thumbprints()
            .find_one(doc! { "fingerprintHash": fingerprint_hash })
            .await?)
    }

    /// Overwrites the visit at `index`.
    pub async fn replace_visit(
        &self,
        fingerprint_hash: &str,
        index: usize,
        visit: &Visit,
    ) -> Result<(), AppError> {
        let visit = bson::to_bson(visit).context("Failed to encode visit")?;

        let mut set = Document::new();
        set.insert(format!("visits.{}", index), visit);

        self.thumbprints()
            .update_one(doc! { "fingerprintHash": fingerprint_hash }, doc! { "$set": set })
            .await?;

        Ok(())
    }

    pub async fn append_visit(&self, fingerprint_hash: &str, visit: &Visit) -> Result<(), AppError> {
        let visit = bson::to_bson(visit).context("Failed to encode visit")?;

        self.thumbprints()
            .update_one(
                doc! { "fingerprintHash": fingerprint_hash },
                doc! { "$push": { "visits": visit } },
            )
            .await?;

        Ok(())
    }

    /// Flags the visitor as converted; `false` when the hash is unknown.
    pub async fn mark_converted(
        &self,
        fingerprint_hash: &str,
        conversion_type: &str,
        now: DateTime,
    ) -> Result<bool, AppError> {
        let result = self
            .thumbprints()
            .update_one(
                doc! { "fingerprintHash": fingerprint_hash },
                doc! { "$set": {
                    "conversion.hasConverted": true,
                    "conversion.conversionDate": now,
                    "conversion.conversionType": conversion_type,
                } },
            )
            .await?;

        Ok(result.matched_count > 0)
    }

    /// Visitors whose `lastSeen` falls in `[start, end]`.
    pub async fn find_seen_between(
        &self,
        start: DateTime,
        end: DateTime,
    ) -> Result<Vec<Thumbprint>, AppError> {
        let thumbprints = self
            .thumbprints()
            .find(doc! { "lastSeen": { "$gte": start, "$lte": end } })
            .await?
            .try_collect()
            .await?;

        Ok(thumbprints)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let hash_index = IndexModel::builder()
            .keys(doc! { "fingerprintHash": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("fingerprint_hash_unique".to_string())
                .build())
            .build();

        let last_seen_index = IndexModel::builder()
            .keys(doc! { "lastSeen": -1 })
            .options(IndexOptions::builder()
                .name("last_seen_desc".to_string())
                .build())
            .build();

        self.thumbprints()
            .create_indexes([hash_index, last_seen_index])
            .await?;

        Ok(())
    }
}

/// Update document for [`ThumbprintRepository::upsert_sighting`].
///
/// A new visitor gets the components, `firstSeen` and a default device; an
/// existing one keeps them. Both get `lastSeen`, a visit count bump and the
/// new visit. User agent and device fields are overwritten only when the
/// browser reported them.
pub(crate) fn sighting_update(sighting: &VisitorSighting, now: DateTime) -> Result<Document, AppError> {
    let visit = Visit::opened(now, sighting.page.clone(), sighting.referrer.clone());
    let visit = bson::to_bson(&visit).context("Failed to encode visit")?;

    let mut set_on_insert = doc! {
        "components": sighting.components.clone(),
        "firstSeen": now,
    };
    let mut set = doc! { "lastSeen": now };

    if let Some(user_agent) = &sighting.user_agent {
        set.insert("userAgent", user_agent.as_str());
    }

    match &sighting.device {
        Some(device) => {
            set.insert("device.type", device.device_type.as_str());
            if let Some(brand) = &device.brand {
                set.insert("device.brand", brand.as_str());
            }
            if let Some(model) = &device.model {
                set.insert("device.model", model.as_str());
            }
        }
        None => {
            set_on_insert.insert("device", doc! { "type": DeviceType::Other.as_str() });
        }
    }

    Ok(doc! {
        "$setOnInsert": set_on_insert,
        "$set": set,
        "$inc": { "visitCount": 1 },
        "$push": { "visits": visit },
    })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Device;

    fn sighting(device: Option<Device>, user_agent: Option<&str>) -> VisitorSighting {
        VisitorSighting {
            fingerprint_hash: "fp-42".to_string(),
            components: doc! { "language": "en-US" },
            user_agent: user_agent.map(str::to_string),
            device,
            page: Some("/faq".to_string()),
            referrer: None,
        }
    }

    #[test]
    fn test_update_without_device_defaults_on_insert_only() {
        let now = DateTime::from_millis(1_700_000_000_000);
        let update = sighting_update(&sighting(None, None), now).unwrap();

        let on_insert = update.get_document("$setOnInsert").unwrap();
        assert_eq!(on_insert.get_document("device").unwrap().get_str("type").unwrap(), "other");
        assert_eq!(on_insert.get_datetime("firstSeen").unwrap(), &now);
        assert_eq!(on_insert.get_document("components").unwrap().get_str("language").unwrap(), "en-US");

        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get_datetime("lastSeen").unwrap(), &now);
        assert!(!set.contains_key("userAgent"));
        assert!(!set.contains_key("device.type"));

        assert_eq!(update.get_document("$inc").unwrap().get_i32("visitCount").unwrap(), 1);

        let visit = update.get_document("$push").unwrap().get_document("visits").unwrap();
        assert_eq!(visit.get_str("page").unwrap(), "/faq");
        assert!(!visit.contains_key("duration"));
    }

    #[test]
    fn test_update_merges_reported_device_fields() {
        let device = Device {
            device_type: DeviceType::Tablet,
            brand: Some("Apple".to_string()),
            model: None,
        };
        let update = sighting_update(&sighting(Some(device), Some("Safari")), DateTime::now()).unwrap();

        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get_str("device.type").unwrap(), "tablet");
        assert_eq!(set.get_str("device.brand").unwrap(), "Apple");
        assert!(!set.contains_key("device.model"));
        assert_eq!(set.get_str("userAgent").unwrap(), "Safari");

        let on_insert = update.get_document("$setOnInsert").unwrap();
        assert!(!on_insert.contains_key("device"));
    }
}
