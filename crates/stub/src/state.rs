use std::sync::Arc;

use lightbox_core::Resource;

use crate::auth::Authenticator;
use crate::config::StubConfig;
use crate::error::ApiResult;
use crate::store::{Document, DocumentStore};

/// Shared application state, passed to all handlers via Axum's `State` extractor.
/// Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    store: DocumentStore,
    config: StubConfig,
    auth: Authenticator,
}

impl AppState {
    pub fn new(config: StubConfig) -> ApiResult<Self> {
        let auth = Authenticator::new(&config)?;
        Ok(Self {
            inner: Arc::new(InnerState {
                store: DocumentStore::new(),
                config,
                auth,
            }),
        })
    }

    pub fn store(&self) -> &DocumentStore {
        &self.inner.store
    }

    pub fn config(&self) -> &StubConfig {
        &self.inner.config
    }

    pub fn auth(&self) -> &Authenticator {
        &self.inner.auth
    }

    /// Insert records with the identifiers they already carry.
    pub fn seed<R: Resource>(&self, records: &[R]) -> Result<(), serde_json::Error> {
        for record in records {
            let doc: Document = match serde_json::to_value(record)? {
                serde_json::Value::Object(doc) => doc,
                other => {
                    return Err(serde::de::Error::custom(format!(
                        "{} record serialized to {other}",
                        R::COLLECTION
                    )))
                }
            };
            self.store().insert(R::COLLECTION, doc);
        }
        Ok(())
    }
}
