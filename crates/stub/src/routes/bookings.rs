use axum::{extract::State, routing::get, Json, Router};
use lightbox_core::schema::{Booking, BookingConfig};
use lightbox_core::Resource;

use super::resources;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const CONFIG_KEY: &str = "bookings.config";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/config", Booking::collection_path()),
            get(get_config).put(put_config),
        )
        .merge(resources::routes::<Booking>(resources::json_create::<Booking>()))
}

async fn get_config(State(state): State<AppState>) -> ApiResult<Json<BookingConfig>> {
    let config = match state.store().setting(CONFIG_KEY) {
        Some(value) => serde_json::from_value(value)?,
        None => BookingConfig::default(),
    };
    Ok(Json(config))
}

async fn put_config(
    State(state): State<AppState>,
    Json(config): Json<BookingConfig>,
) -> ApiResult<Json<BookingConfig>> {
    if config.slot_minutes == 0 {
        return Err(ApiError::BadRequest("slotMinutes must be positive".to_string()));
    }
    if config.opening_time >= config.closing_time {
        return Err(ApiError::BadRequest(
            "openingTime must be before closingTime".to_string(),
        ));
    }
    state
        .store()
        .put_setting(CONFIG_KEY, serde_json::to_value(&config)?);
    Ok(Json(config))
}
