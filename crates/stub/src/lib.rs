//! In-memory stand-in for the studio backend.
//!
//! Speaks the same `/api/<resource>` contract as the real service so the
//! client can be developed and tested against it. Nothing is persisted.

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

pub use config::StubConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// The router with its middleware stack, ready to serve.
pub fn app(state: AppState) -> Router {
    let body_limit = state.config().max_body_bytes;
    routes::build_router(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(middleware::request_tracing::trace_layer())
        .layer(middleware::cors::cors_layer())
}
