//! CRUD routes shared by every collection.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, MethodRouter},
    Json, Router,
};
use lightbox_core::{Draft, Resource};
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::store::{self, Document, ID_FIELD};

/// `GET|POST /api/<r>` and `GET|PUT|DELETE /api/<r>/{id}`.
/// `create` handles the POST so a collection can accept a non-JSON body.
pub fn routes<R: Resource>(create: MethodRouter<AppState>) -> Router<AppState> {
    let collection = R::collection_path();
    Router::new()
        .route(&collection, create.get(list::<R>))
        .route(
            &format!("{collection}/{{id}}"),
            get(fetch::<R>).put(update::<R>).delete(remove::<R>),
        )
}

/// The default JSON create handler.
pub fn json_create<R: Resource>() -> MethodRouter<AppState> {
    post(create::<R>)
}

/// Round-trip a document through `R` so it is stored in full canonical shape.
pub fn normalize<R: Resource>(doc: Document) -> ApiResult<Document> {
    let record: R = serde_json::from_value(Value::Object(doc))?;
    to_document(&record)
}

pub fn to_document<T: Serialize>(value: &T) -> ApiResult<Document> {
    match serde_json::to_value(value)? {
        Value::Object(doc) => Ok(doc),
        other => Err(ApiError::Internal(format!("expected an object, got {other}"))),
    }
}

/// Assign a fresh identifier to validated fields and store the result.
pub fn insert_new<R: Resource>(state: &AppState, mut fields: Document) -> ApiResult<Document> {
    fields.insert(ID_FIELD.to_string(), Value::String(store::new_id()));
    let doc = normalize::<R>(fields)?;
    tracing::debug!(collection = R::COLLECTION, id = ?doc.get(ID_FIELD), "document created");
    Ok(state.store().insert(R::COLLECTION, doc))
}

/// Apply `f` to a stored document. The result must still decode as `R` and
/// pass the same draft checks as a create, or nothing is committed.
pub fn modify<R: Resource>(
    state: &AppState,
    id: &str,
    f: impl FnOnce(&mut Document) -> ApiResult<()>,
) -> ApiResult<Document> {
    state
        .store()
        .modify::<ApiError>(R::COLLECTION, id, |doc| {
            f(doc)?;
            let record: R = serde_json::from_value(Value::Object(std::mem::take(doc)))?;
            record.to_draft().validate()?;
            *doc = to_document(&record)?;
            Ok(())
        })?
        .ok_or_else(|| ApiError::record_not_found(R::COLLECTION, id))
}

async fn list<R: Resource>(
    State(state): State<AppState>,
    Query(filters): Query<HashMap<String, String>>,
) -> Json<Vec<Document>> {
    Json(state.store().list(R::COLLECTION, &filters))
}

async fn fetch<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Document>> {
    state
        .store()
        .get(R::COLLECTION, &id)
        .map(Json)
        .ok_or_else(|| ApiError::record_not_found(R::COLLECTION, &id))
}

async fn create<R: Resource>(
    State(state): State<AppState>,
    Json(draft): Json<R::Draft>,
) -> ApiResult<(StatusCode, Json<Document>)> {
    draft.validate()?;
    let doc = insert_new::<R>(&state, to_document(&draft)?)?;
    Ok((StatusCode::CREATED, Json(doc)))
}

async fn update<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<R::Draft>,
) -> ApiResult<Json<Document>> {
    let patch = to_document(&patch)?;
    let doc = modify::<R>(&state, &id, |doc| {
        store::merge(doc, patch);
        Ok(())
    })?;
    Ok(Json(doc))
}

async fn remove<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if state.store().remove(R::COLLECTION, &id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::record_not_found(R::COLLECTION, &id))
    }
}
