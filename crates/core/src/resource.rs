//! The contract every studio resource shares.
//!
//! Each entity type (`Booking`, `Staff`, ...) implements [`Resource`] once, and
//! the client, list view and form view are written against the trait. That is
//! what keeps every resource page behaving the same way.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::record::id::{collection_path, RecordId};
use crate::record::validate::ValidationError;

pub trait Resource: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection segment under `/api`, e.g. `"bookings"`.
    const COLLECTION: &'static str;

    /// Partial record collected by a form. Never carries an identifier.
    type Draft: Draft;

    /// Query-string filters accepted by the list endpoint.
    type Filter: Serialize + Default + Clone + Debug + Send + Sync + 'static;

    fn id(&self) -> &RecordId;

    /// Seed an edit form from an existing record.
    fn to_draft(&self) -> Self::Draft;

    fn collection_path() -> String {
        collection_path(Self::COLLECTION)
    }

    fn record_path(id: &RecordId) -> String {
        id.record_path(Self::COLLECTION)
    }
}

pub trait Draft: Clone + Debug + Default + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Required-field and constraint checks, run before any request.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Request body for the create call. JSON unless a resource uploads files.
    fn create_body(&self) -> Result<CreateBody, serde_json::Error> {
        Ok(CreateBody::Json(serde_json::to_value(self)?))
    }
}

/// Body of a create request.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateBody {
    Json(Value),
    Multipart(Vec<FormPart>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, file: Upload },
}

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// Filter for resources whose list endpoint takes no parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NoFilter {}
