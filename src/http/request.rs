//! Request ID generation and lookup.
//!
//! # Responsibilities
//! - Assign a UUID v4 `x-request-id` to requests that arrive without one
//! - Let handlers read the ID for logging and downstream propagation
//!
//! # Design Decisions
//! - A caller-supplied ID is kept as-is
//! - The ID is echoed on the response (see `server.rs` layer stack)

use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};

/// Header carrying the correlation ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Read the request ID from a header map.
pub trait RequestIdExt {
    fn request_id(&self) -> Option<&HeaderValue>;

    /// Request ID as text, or `"unknown"` when absent or not visible ASCII.
    fn request_id_str(&self) -> &str {
        self.request_id()
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
    }
}

impl RequestIdExt for HeaderMap {
    fn request_id(&self) -> Option<&HeaderValue> {
        self.get(X_REQUEST_ID)
    }
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<&HeaderValue> {
        self.headers().get(X_REQUEST_ID)
    }
}
