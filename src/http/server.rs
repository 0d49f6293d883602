//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router and register every route explicitly
//! - Construct the name-service client and inject it as handler state
//! - Wire up middleware (request ID, tracing, request timeout)
//! - Serve until the shutdown signal, then drain

use std::time::Duration;

use axum::{
    body::Body,
    http::{uri::InvalidUri, Request},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{ServiceConfig, TimeoutConfig};
use crate::http::request::{MakeRequestUuid, RequestIdExt};
use crate::http::users::{health, list_users, HEALTH_ROUTE, USERS_ROUTE};
use crate::name_service::NameServiceClient;

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub names: NameServiceClient,
}

/// HTTP server for the user service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Result<Self, InvalidUri> {
        let names = NameServiceClient::new(&config.upstream, &config.timeouts)?;
        let router = build_router(&config.timeouts, AppState { names });

        Ok(Self { router, config })
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.names_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// A clone of the fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build the route table with all middleware layers.
#[allow(deprecated)]
pub fn build_router(timeouts: &TimeoutConfig, state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request.request_id_str(),
                )
            }),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(Duration::from_secs(timeouts.request_secs)));

    Router::new()
        .route(USERS_ROUTE, get(list_users))
        .route(HEALTH_ROUTE, get(health))
        .with_state(state)
        .layer(middleware)
}
