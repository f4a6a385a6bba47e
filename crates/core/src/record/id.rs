/// Record identifiers.
///
/// Identifiers are opaque strings assigned by the backend when a record is
/// created. The client only ever receives them, compares them and echoes them
/// back in request paths:
/// - Collection path: `/api/{collection}`
/// - Record path: `/api/{collection}/{id}`
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap an identifier received from the backend.
    pub fn new(id: impl Into<String>) -> Self {
        RecordId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Path of this record inside `collection`, e.g. `/api/bookings/b1`.
    pub fn record_path(&self, collection: &str) -> String {
        format!("{}/{}", collection_path(collection), self.0)
    }
}

/// Base path for a collection, e.g. `/api/bookings`.
pub fn collection_path(collection: &str) -> String {
    format!("/api/{collection}")
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        RecordId(id)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for RecordId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RecordId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_collection_and_record_paths() {
        let id = RecordId::from("b1");
        assert_eq!(collection_path("bookings"), "/api/bookings");
        assert_eq!(id.record_path("bookings"), "/api/bookings/b1");
    }

    #[test]
    fn serializes_as_bare_string() {
        let id = RecordId::new("f2");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"f2\"");

        let parsed: RecordId = serde_json::from_str("\"st1\"").unwrap();
        assert_eq!(parsed, "st1");
    }
}
