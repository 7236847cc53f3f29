//! Root path handler.
//!
//! The reply never depends on the request: method, headers, query string and
//! body are all ignored, so any orchestrator probe style gets the same answer.

use axum::{extract::State, Extension};
use http::StatusCode;
use tracing::instrument;

use super::reply::Reply;
use crate::middleware::RequestId;
use crate::state::AppState;

/// Welcome handler, mounted for every method on `/`.
#[instrument(name = "home::index", skip(state, request_id))]
pub async fn index(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Reply {
    tracing::debug!(request_id = %request_id.0, "Serving welcome");
    Reply::text(StatusCode::OK, state.welcome.clone())
}
