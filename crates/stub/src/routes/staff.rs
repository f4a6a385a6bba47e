use axum::{
    extract::{Path, State},
    routing::put,
    Json, Router,
};
use lightbox_core::schema::{AvailabilityUpdate, Staff};
use lightbox_core::Resource;
use serde_json::Value;

use super::resources;
use crate::error::ApiResult;
use crate::state::AppState;
use crate::store::Document;

pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(resources::routes::<Staff>(resources::json_create::<Staff>()))
        .route(
            &format!("{}/availability/{{id}}", Staff::collection_path()),
            put(set_availability),
        )
}

async fn set_availability(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<AvailabilityUpdate>,
) -> ApiResult<Json<Document>> {
    let doc = resources::modify::<Staff>(&state, &id, |doc| {
        doc.insert("availability".to_string(), Value::Bool(update.availability));
        Ok(())
    })?;
    tracing::debug!(%id, availability = update.availability, "staff availability changed");
    Ok(Json(doc))
}
