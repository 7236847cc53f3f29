//! Tagged response value produced by route handlers.

use axum::body::{Body, Bytes};
use axum::response::{IntoResponse, Response};
use http::header::{HeaderValue, CONTENT_TYPE};
use http::StatusCode;

pub const TEXT_PLAIN_UTF8: &str = "text/plain; charset=utf-8";

/// Status, content type and body of a reply, independent of the transport.
///
/// Handlers return this instead of building `Response` directly so the
/// selection logic can be asserted on without going through a socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: StatusCode,
    pub content_type: Option<&'static str>,
    pub body: Bytes,
}

impl Reply {
    /// A `text/plain` reply.
    pub fn text(status: StatusCode, body: Bytes) -> Self {
        Self {
            status,
            content_type: Some(TEXT_PLAIN_UTF8),
            body,
        }
    }

    /// A reply with no body and no content type.
    pub fn empty(status: StatusCode) -> Self {
        Self {
            status,
            content_type: None,
            body: Bytes::new(),
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        if let Some(content_type) = self.content_type {
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        response
    }
}
