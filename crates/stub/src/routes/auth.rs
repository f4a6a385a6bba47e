use axum::{extract::State, routing::post, Json, Router};
use lightbox_core::session::{Credentials, LoginResponse};

use crate::error::ApiResult;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/auth/login", post(login))
}

async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> ApiResult<Json<LoginResponse>> {
    state.auth().login(&credentials).map(Json)
}
