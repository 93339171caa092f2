//! Outbound HTTP client for the upstream API.
//!
//! # Responsibilities
//! - Issue exactly one GET per proxied request
//! - Classify failures (status, body, network)
//! - Decode the upstream body as JSON
//!
//! # Design Decisions
//! - No retries; the caller sees the first outcome
//! - No deadline unless `upstream.timeout_secs` is set
//! - Body is read fully before decoding so transport and decode
//!   failures stay distinguishable

use std::time::Duration;

use axum::http::StatusCode;
use reqwest::IntoUrl;
use serde_json::Value;
use thiserror::Error;

use crate::config::UpstreamConfig;

/// Errors from a single upstream call.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Upstream answered with a non-2xx status.
    #[error("Failed fetch: {}", .0.as_u16())]
    Status(StatusCode),

    /// Upstream answered 2xx but the body is not JSON.
    #[error("{0}")]
    Body(#[from] serde_json::Error),

    /// The request never completed (DNS, connect, TLS, reset, timeout).
    #[error("{0}")]
    Network(#[from] reqwest::Error),
}

impl UpstreamError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Status(_) | UpstreamError::Body(_) => "upstream",
            UpstreamError::Network(_) => "network",
        }
    }
}

/// Shared client. Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            http: builder.build()?,
        })
    }

    /// GET `url` and decode the body as JSON.
    pub async fn fetch_json(&self, url: impl IntoUrl) -> Result<Value, UpstreamError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
