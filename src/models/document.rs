use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::EntityKind;

/// A record the document store can persist.
///
/// Every document serializes a boolean `deleted` field; the store filters on
/// it for live reads.
pub trait Document: Serialize + DeserializeOwned {
    const COLLECTION: &'static str;
    const KIND: EntityKind;

    /// `None` until the first save.
    fn id(&self) -> Option<&str>;

    fn created_at(&self) -> Option<DateTime<Utc>>;

    /// Called by the store on every save.
    fn stamp(&mut self, id: String, created_at: DateTime<Utc>, updated_at: DateTime<Utc>);
}
