//! Name-service payload and error definitions.

use std::time::Duration;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ordered list of names as returned by the name-service.
///
/// Decodes only from a JSON array whose elements are all strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameList(Vec<String>);

impl NameList {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    /// Decode a response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, ForwardError> {
        serde_json::from_slice(body).map_err(ForwardError::Decode)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

/// Errors that can occur while fetching names from the downstream.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// Outbound request could not be built.
    #[error("failed to build upstream request: {0}")]
    Request(#[from] axum::http::Error),

    /// Connection refused, DNS failure, or the connection broke mid-exchange.
    #[error("name-service unavailable: {0}")]
    Unavailable(#[source] hyper_util::client::legacy::Error),

    /// No complete response within the configured deadline.
    #[error("name-service did not respond within {}s", .0.as_secs())]
    Timeout(Duration),

    /// Downstream answered with a non-2xx status.
    #[error("name-service returned status {0}")]
    Status(StatusCode),

    /// Body could not be read or exceeded the size limit.
    #[error("failed to read name-service response body: {0}")]
    Body(#[source] axum::Error),

    /// Body was not a JSON array of strings.
    #[error("malformed name-service response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ForwardError {
    /// Short machine-readable label, used in error bodies and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ForwardError::Request(_) => "internal",
            ForwardError::Unavailable(_) => "upstream_unavailable",
            ForwardError::Timeout(_) => "upstream_timeout",
            ForwardError::Status(_) => "upstream_status",
            ForwardError::Body(_) => "upstream_body",
            ForwardError::Decode(_) => "upstream_malformed",
        }
    }

    /// Status code reported to the inbound caller.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ForwardError::Request(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ForwardError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ForwardError::Unavailable(_)
            | ForwardError::Status(_)
            | ForwardError::Body(_)
            | ForwardError::Decode(_) => StatusCode::BAD_GATEWAY,
        }
    }
}
