//! HTTP route handlers.
//!
//! Exactly one route is registered: `/`, for every method. Everything else
//! falls through to a plain 404. Cache-Control is attached per route group,
//! and request tracing is enabled via middleware that generates a unique
//! request ID for each incoming request.

pub mod home;
pub mod reply;

use axum::{middleware, routing::any, Extension, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use http::{StatusCode, Uri};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{CACHE_CONTROL_NOT_FOUND, CACHE_CONTROL_ROOT, ROOT_PATH};
use crate::middleware::{request_id_layer, RequestId};
use crate::state::AppState;

pub use reply::Reply;

/// Fallback for every path other than `/`, whatever the method.
pub async fn not_found(uri: Uri, Extension(request_id): Extension<RequestId>) -> Reply {
    tracing::debug!(request_id = %request_id.0, path = %uri.path(), "No route for path");
    Reply::empty(StatusCode::NOT_FOUND)
}

/// Creates the Axum router with the root route, 404 fallback and cache headers.
pub fn create_router(state: AppState) -> Router {
    let root_routes = Router::new()
        .route(ROOT_PATH, any(home::index))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_ROOT),
        ));

    Router::new()
        .merge(root_routes)
        .fallback(not_found)
        .with_state(state)
        // Short TTL for anything the root group did not already tag
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NOT_FOUND),
        ))
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
