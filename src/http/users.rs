//! Route handlers.
//!
//! # Responsibilities
//! - `GET /users`: one name-service call, relay the list or map the failure
//! - `GET /health`: liveness only
//! - Record per-route request metrics

use std::time::Instant;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::http::request::RequestIdExt;
use crate::http::server::AppState;
use crate::observability::metrics;

pub const USERS_ROUTE: &str = "/users";
pub const HEALTH_ROUTE: &str = "/health";

/// `GET /users`: relay the name-service's list to the caller.
pub async fn list_users(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let start_time = Instant::now();
    let request_id = headers.request_id_str();

    match state.names.fetch_names(headers.request_id()).await {
        Ok(names) => {
            tracing::debug!(
                request_id = %request_id,
                count = names.len(),
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                "Names fetched"
            );
            metrics::record_request(USERS_ROUTE, StatusCode::OK.as_u16(), start_time);
            (StatusCode::OK, Json(names)).into_response()
        }
        Err(e) => {
            let status = e.status_code();
            tracing::warn!(
                request_id = %request_id,
                upstream = %state.names.names_uri(),
                kind = e.kind(),
                status = status.as_u16(),
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                error = %e,
                "Name-service call failed"
            );
            metrics::record_upstream_error(e.kind());
            metrics::record_request(USERS_ROUTE, status.as_u16(), start_time);
            e.into_response()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /health`: liveness only, never touches the name-service.
pub async fn health() -> Json<HealthStatus> {
    let start_time = Instant::now();
    metrics::record_request(HEALTH_ROUTE, StatusCode::OK.as_u16(), start_time);
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
