//! Error response rendering.
//!
//! Downstream failures become a small JSON body with the status chosen by
//! `ForwardError::status_code`: 504 for timeouts, 502 for everything else the
//! name-service can do wrong.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::name_service::ForwardError;

/// JSON body returned on failure.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, StatusCode};

    #[tokio::test]
    async fn renders_json_error_body() {
        let response = ForwardError::Status(StatusCode::NOT_FOUND).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "upstream_status");
        assert_eq!(json["message"], "name-service returned status 404 Not Found");
    }
}
