use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use lightbox_core::schema::{Feedback, Reply};
use lightbox_core::Resource;
use serde_json::Value;

use super::resources;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::store::Document;

pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(resources::routes::<Feedback>(resources::json_create::<Feedback>()))
        .route(
            &format!("{}/{{id}}/reply", Feedback::collection_path()),
            post(add_reply),
        )
}

/// Append a timestamped reply and answer with the whole feedback record.
async fn add_reply(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut reply): Json<Reply>,
) -> ApiResult<Json<Document>> {
    reply.validate()?;
    reply.timestamp = Some(Utc::now());
    let reply = serde_json::to_value(&reply)?;

    let doc = resources::modify::<Feedback>(&state, &id, |doc| {
        match doc.entry("replies").or_insert_with(|| Value::Array(Vec::new())) {
            Value::Array(replies) => {
                replies.push(reply);
                Ok(())
            }
            _ => Err(ApiError::Internal(format!("feedback {id} has malformed replies"))),
        }
    })?;
    Ok(Json(doc))
}
