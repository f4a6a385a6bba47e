use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// Build the CORS layer. Any origin may call the stub; only the verbs the
/// API uses are allowed.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}
