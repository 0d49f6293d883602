//! HTTP client for the downstream name-service.
//!
//! # Responsibilities
//! - Issue exactly one `GET` per call to the configured names URL
//! - Enforce connect timeout and an overall per-call deadline
//! - Read the body up to a size limit and decode it into a `NameList`

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, uri::InvalidUri, HeaderValue, Method, Request, Uri};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::time::timeout;

use crate::config::{TimeoutConfig, UpstreamConfig};
use crate::http::X_REQUEST_ID;
use crate::name_service::types::{ForwardError, NameList};

const USER_AGENT: &str = concat!("user-service/", env!("CARGO_PKG_VERSION"));

/// Client for the names endpoint.
///
/// Cheap to clone; clones share the same connection pool.
#[derive(Clone)]
pub struct NameServiceClient {
    client: Client<HttpConnector, Body>,
    names_uri: Uri,
    max_body_bytes: usize,
    timeout_duration: Duration,
}

impl NameServiceClient {
    /// Build a client from configuration.
    pub fn new(upstream: &UpstreamConfig, timeouts: &TimeoutConfig) -> Result<Self, InvalidUri> {
        let names_uri: Uri = upstream.names_url.parse()?;

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(timeouts.connect_secs)));

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Ok(Self {
            client,
            names_uri,
            max_body_bytes: upstream.max_body_bytes,
            timeout_duration: Duration::from_secs(timeouts.upstream_secs),
        })
    }

    /// The URI every call is sent to.
    pub fn names_uri(&self) -> &Uri {
        &self.names_uri
    }

    /// Fetch the current name list.
    ///
    /// `request_id` is forwarded as `x-request-id` for correlation.
    pub async fn fetch_names(
        &self,
        request_id: Option<&HeaderValue>,
    ) -> Result<NameList, ForwardError> {
        let mut builder = Request::builder()
            .method(Method::GET)
            .uri(self.names_uri.clone())
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, USER_AGENT);
        if let Some(id) = request_id {
            builder = builder.header(X_REQUEST_ID, id.clone());
        }
        let request = builder.body(Body::empty())?;

        match timeout(self.timeout_duration, self.exchange(request)).await {
            Ok(result) => result,
            Err(_) => Err(ForwardError::Timeout(self.timeout_duration)),
        }
    }

    async fn exchange(&self, request: Request<Body>) -> Result<NameList, ForwardError> {
        let response = self
            .client
            .request(request)
            .await
            .map_err(ForwardError::Unavailable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForwardError::Status(status));
        }

        let body = axum::body::to_bytes(Body::new(response.into_body()), self.max_body_bytes)
            .await
            .map_err(ForwardError::Body)?;

        NameList::from_slice(&body)
    }
}

impl std::fmt::Debug for NameServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameServiceClient")
            .field("names_uri", &self.names_uri)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("timeout", &self.timeout_duration)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a single canned HTTP response and hand back the raw request.
    async fn one_shot_backend(response: String) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let n = socket.read(&mut buf).await.unwrap();
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&buf[..n]).into_owned()
        });
        (format!("http://{addr}/names"), handle)
    }

    fn client_for(url: String) -> NameServiceClient {
        let upstream = UpstreamConfig {
            names_url: url,
            ..UpstreamConfig::default()
        };
        NameServiceClient::new(&upstream, &TimeoutConfig::default()).unwrap()
    }

    fn ok_response(body: &str) -> String {
        format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        )
    }

    #[tokio::test]
    async fn fetches_and_decodes_names() {
        let (url, backend) = one_shot_backend(ok_response(r#"["alice","bob"]"#)).await;
        let names = client_for(url).fetch_names(None).await.unwrap();

        assert_eq!(names.into_inner(), vec!["alice".to_string(), "bob".to_string()]);

        let raw = backend.await.unwrap();
        assert!(raw.starts_with("GET /names HTTP/1.1\r\n"), "{raw}");
    }

    #[tokio::test]
    async fn forwards_request_id() {
        let (url, backend) = one_shot_backend(ok_response("[]")).await;
        let id = HeaderValue::from_static("req-123");
        client_for(url).fetch_names(Some(&id)).await.unwrap();

        let raw = backend.await.unwrap().to_ascii_lowercase();
        assert!(raw.contains("x-request-id: req-123"), "{raw}");
    }

    #[tokio::test]
    async fn non_success_status_is_error() {
        let body = "oops";
        let response = format!(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        let (url, _backend) = one_shot_backend(response).await;
        let err = client_for(url).fetch_names(None).await.unwrap_err();

        assert!(matches!(err, ForwardError::Status(s) if s.as_u16() == 500));
    }

    #[tokio::test]
    async fn oversized_body_is_error() {
        let (url, _backend) = one_shot_backend(ok_response(r#"["a-rather-long-name"]"#)).await;
        let upstream = UpstreamConfig {
            names_url: url,
            max_body_bytes: 4,
        };
        let client = NameServiceClient::new(&upstream, &TimeoutConfig::default()).unwrap();

        let err = client.fetch_names(None).await.unwrap_err();
        assert!(matches!(err, ForwardError::Body(_)), "{err:?}");
    }

    #[tokio::test]
    async fn refused_connection_is_unavailable() {
        // Bind then drop to get a port nobody listens on.
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let err = client_for(format!("http://{addr}/names"))
            .fetch_names(None)
            .await
            .unwrap_err();

        assert!(matches!(err, ForwardError::Unavailable(_)), "{err:?}");
    }
}
