use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use lightbox_core::schema::album::IMAGE_PART;
use lightbox_core::schema::{Album, AlbumDraft};
use lightbox_core::Draft;
use serde_json::Value;

use super::resources;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::store::{Document, StoredUpload};

pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(resources::routes::<Album>(post(create)))
        .route("/uploads/{id}", get(download))
}

/// Album creation is the one multipart endpoint: text fields plus one
/// `images` part per file.
async fn create(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<Document>)> {
    let mut draft = AlbumDraft::default();
    let mut images = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == IMAGE_PART {
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read field: {e}")))?;
            let id = state.store().put_upload(StoredUpload {
                content_type,
                bytes: bytes.to_vec(),
            });
            tracing::debug!(%id, size = bytes.len(), "album image stored");
            images.push(Value::String(format!("/uploads/{id}")));
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read field: {e}")))?;
        match name.as_str() {
            "title" => draft.title = Some(value),
            "description" => draft.description = Some(value),
            "clientId" => draft.client_id = Some(value),
            other => tracing::debug!(field = other, "ignoring unknown album field"),
        }
    }

    draft.validate()?;
    let mut fields = resources::to_document(&draft)?;
    fields.insert("images".to_string(), Value::Array(images));
    fields.insert("createdAt".to_string(), serde_json::to_value(Utc::now())?);
    let doc = resources::insert_new::<Album>(&state, fields)?;
    Ok((StatusCode::CREATED, Json(doc)))
}

async fn download(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let upload = state
        .store()
        .upload(&id)
        .ok_or_else(|| ApiError::NotFound(format!("uploads/{id}")))?;
    Ok(([(header::CONTENT_TYPE, upload.content_type)], upload.bytes))
}
