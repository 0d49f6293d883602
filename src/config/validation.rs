//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. All errors are collected
//! rather than stopping at the first one.

use std::net::SocketAddr;

use axum::http::Uri;
use thiserror::Error;
use url::Url;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid socket address for {field}: '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("invalid upstream.names_url '{value}': {reason}")]
    InvalidUpstreamUrl { value: String, reason: String },

    #[error("invalid observability.log_level '{0}', expected trace, debug, info, warn or error")]
    InvalidLogLevel(String),

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("timeouts.upstream_secs ({upstream}) must be less than timeouts.request_secs ({request})")]
    UpstreamExceedsRequest { upstream: u64, request: u64 },
}

/// Validate a configuration, returning every error found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_addr(
        &mut errors,
        "listener.bind_address",
        &config.listener.bind_address,
    );
    if config.observability.metrics_enabled {
        check_addr(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if config.observability.log_level.parse::<tracing::Level>().is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if let Err(reason) = check_upstream_url(&config.upstream.names_url) {
        errors.push(ValidationError::InvalidUpstreamUrl {
            value: config.upstream.names_url.clone(),
            reason,
        });
    }

    if config.upstream.max_body_bytes == 0 {
        errors.push(ValidationError::Zero { field: "upstream.max_body_bytes" });
    }

    let t = &config.timeouts;
    for (field, value) in [
        ("timeouts.connect_secs", t.connect_secs),
        ("timeouts.upstream_secs", t.upstream_secs),
        ("timeouts.request_secs", t.request_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::Zero { field });
        }
    }
    if t.upstream_secs > 0 && t.request_secs > 0 && t.upstream_secs >= t.request_secs {
        errors.push(ValidationError::UpstreamExceedsRequest {
            upstream: t.upstream_secs,
            request: t.request_secs,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_addr(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn check_upstream_url(value: &str) -> Result<(), String> {
    let url = Url::parse(value).map_err(|e| e.to_string())?;
    if url.scheme() != "http" {
        return Err(format!("unsupported scheme '{}', only http is supported", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    // The client sends to the raw string parsed as an `http::Uri`, which is
    // stricter than `url` about unescaped characters.
    value.parse::<Uri>().map_err(|e| e.to_string())?;
    Ok(())
}
