use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::id::RecordId;
use crate::resource::Resource;

/// Emitted after a successful mutation so that lists showing the same
/// collection can reconcile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StudioEvent {
    Changed(ChangeEvent),
    Deleted(DeleteEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeKind {
    Created,
    Updated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    pub collection: String,
    pub id: RecordId,
    pub kind: ChangeKind,
    /// The record as the backend returned it.
    pub record: Value,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEvent {
    pub collection: String,
    pub id: RecordId,
    pub timestamp: DateTime<Utc>,
}

impl StudioEvent {
    pub fn changed<R: Resource>(kind: ChangeKind, record: &R) -> Result<Self, serde_json::Error> {
        Ok(StudioEvent::Changed(ChangeEvent {
            collection: R::COLLECTION.to_string(),
            id: record.id().clone(),
            kind,
            record: serde_json::to_value(record)?,
            timestamp: Utc::now(),
        }))
    }

    pub fn deleted<R: Resource>(id: &RecordId) -> Self {
        StudioEvent::Deleted(DeleteEvent {
            collection: R::COLLECTION.to_string(),
            id: id.clone(),
            timestamp: Utc::now(),
        })
    }

    pub fn collection(&self) -> &str {
        match self {
            StudioEvent::Changed(e) => &e.collection,
            StudioEvent::Deleted(e) => &e.collection,
        }
    }

    pub fn id(&self) -> &RecordId {
        match self {
            StudioEvent::Changed(e) => &e.id,
            StudioEvent::Deleted(e) => &e.id,
        }
    }

    pub fn concerns<R: Resource>(&self) -> bool {
        self.collection() == R::COLLECTION
    }
}
