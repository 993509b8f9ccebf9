//! CORS middleware configuration
//!
//! The relay is called from arbitrary web frontends, so every response
//! allows any origin with GET/POST and a Content-Type request header.

use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// Create the permissive CORS layer applied to every route
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}
