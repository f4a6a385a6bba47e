//! In-memory document storage.
//!
//! One insertion-ordered collection of JSON documents per resource. Order is
//! what list endpoints return, so nothing here ever sorts.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::{Map, Value};
use uuid::Uuid;

pub type Document = Map<String, Value>;

pub const ID_FIELD: &str = "id";

/// An uploaded file kept for `GET /uploads/{id}`.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct DocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    settings: RwLock<HashMap<String, Value>>,
    uploads: RwLock<HashMap<String, StoredUpload>>,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

fn id_of(doc: &Document) -> Option<&str> {
    doc.get(ID_FIELD).and_then(Value::as_str)
}

/// Query-string equality: strings compare directly, other scalars by their
/// JSON text (`true`, `42`).
fn matches(doc: &Document, filters: &HashMap<String, String>) -> bool {
    filters.iter().all(|(field, expected)| match doc.get(field) {
        Some(Value::String(actual)) => actual == expected,
        Some(Value::Null) | None => false,
        Some(other) => other.to_string() == *expected,
    })
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self, collection: &str, filters: &HashMap<String, String>) -> Vec<Document> {
        read(&self.collections)
            .get(collection)
            .map(|docs| docs.iter().filter(|d| matches(d, filters)).cloned().collect())
            .unwrap_or_default()
    }

    pub fn get(&self, collection: &str, id: &str) -> Option<Document> {
        read(&self.collections)
            .get(collection)?
            .iter()
            .find(|d| id_of(d) == Some(id))
            .cloned()
    }

    /// Append `doc`, which must already carry its `id`.
    pub fn insert(&self, collection: &str, doc: Document) -> Document {
        write(&self.collections)
            .entry(collection.to_string())
            .or_default()
            .push(doc.clone());
        doc
    }

    /// Run `f` on a copy of the document and keep the copy only if `f`
    /// succeeds. `Ok(None)` when there is no such document.
    pub fn modify<E>(
        &self,
        collection: &str,
        id: &str,
        f: impl FnOnce(&mut Document) -> Result<(), E>,
    ) -> Result<Option<Document>, E> {
        let mut collections = write(&self.collections);
        let Some(doc) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| id_of(d) == Some(id)))
        else {
            return Ok(None);
        };
        let mut candidate = doc.clone();
        f(&mut candidate)?;
        // The identifier is immutable whatever the patch said.
        candidate.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
        *doc = candidate.clone();
        Ok(Some(candidate))
    }

    pub fn remove(&self, collection: &str, id: &str) -> bool {
        let mut collections = write(&self.collections);
        let Some(docs) = collections.get_mut(collection) else {
            return false;
        };
        let before = docs.len();
        docs.retain(|d| id_of(d) != Some(id));
        docs.len() != before
    }

    pub fn document_count(&self) -> usize {
        read(&self.collections).values().map(Vec::len).sum()
    }

    pub fn setting(&self, key: &str) -> Option<Value> {
        read(&self.settings).get(key).cloned()
    }

    pub fn put_setting(&self, key: &str, value: Value) {
        write(&self.settings).insert(key.to_string(), value);
    }

    pub fn put_upload(&self, upload: StoredUpload) -> String {
        let id = new_id();
        write(&self.uploads).insert(id.clone(), upload);
        id
    }

    pub fn upload(&self, id: &str) -> Option<StoredUpload> {
        read(&self.uploads).get(id).cloned()
    }
}

/// Shallow merge: top-level fields of `patch` replace those of `doc`.
pub fn merge(doc: &mut Document, patch: Document) {
    for (key, value) in patch {
        doc.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn list_keeps_insertion_order_and_filters() {
        let store = DocumentStore::new();
        store.insert("staff", doc(json!({ "id": "b", "availability": true })));
        store.insert("staff", doc(json!({ "id": "a", "availability": false })));
        store.insert("staff", doc(json!({ "id": "c", "availability": true })));

        let all = store.list("staff", &HashMap::new());
        let ids: Vec<_> = all.iter().filter_map(id_of).collect();
        assert_eq!(ids, ["b", "a", "c"]);

        let filters = HashMap::from([("availability".to_string(), "true".to_string())]);
        let available = store.list("staff", &filters);
        assert_eq!(available.len(), 2);
        assert!(store.list("albums", &filters).is_empty());
    }

    #[test]
    fn modify_is_all_or_nothing() {
        let store = DocumentStore::new();
        store.insert("packages", doc(json!({ "id": "p1", "name": "Portrait" })));

        let failed: Result<_, &str> = store.modify("packages", "p1", |d| {
            d.insert("name".into(), json!("Changed"));
            Err("rejected")
        });
        assert!(failed.is_err());
        assert_eq!(store.get("packages", "p1").unwrap()["name"], "Portrait");

        let updated = store
            .modify::<()>("packages", "p1", |d| {
                merge(d, doc(json!({ "id": "hijack", "name": "Family" })));
                Ok(())
            })
            .unwrap()
            .unwrap();
        assert_eq!(updated["id"], "p1");
        assert_eq!(updated["name"], "Family");
        assert!(store.modify::<()>("packages", "nope", |_| Ok(())).unwrap().is_none());
    }

    #[test]
    fn remove_reports_whether_anything_went() {
        let store = DocumentStore::new();
        store.insert("feedback", doc(json!({ "id": "f1" })));
        assert!(store.remove("feedback", "f1"));
        assert!(!store.remove("feedback", "f1"));
        assert_eq!(store.document_count(), 0);
    }
}
