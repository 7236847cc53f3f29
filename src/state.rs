//! Shared application state for request handlers.

use axum::body::Bytes;

use crate::config::WELCOME_MESSAGE;

/// Immutable state built once at startup and cloned into every handler.
///
/// Nothing in here is ever mutated after construction, so handlers running on
/// different connections need no coordination.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Body of the root reply. Cloning `Bytes` only bumps a refcount.
    pub welcome: Bytes,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            welcome: Bytes::from_static(WELCOME_MESSAGE.as_bytes()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
