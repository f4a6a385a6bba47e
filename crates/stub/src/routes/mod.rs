pub mod albums;
pub mod auth;
pub mod bookings;
pub mod feedback;
pub mod health;
pub mod resources;
pub mod staff;

use axum::Router;
use lightbox_core::schema::{Package, Portfolio};

use crate::state::AppState;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(albums::routes())
        .merge(bookings::routes())
        .merge(feedback::routes())
        .merge(staff::routes())
        .merge(resources::routes::<Portfolio>(resources::json_create::<Portfolio>()))
        .merge(resources::routes::<Package>(resources::json_create::<Package>()))
        .with_state(state)
}
