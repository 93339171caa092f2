//! Response bodies returned to callers.
//!
//! # Design Decisions
//! - Templated routes always answer with an [`Envelope`]
//! - Wildcard routes pass upstream JSON through, or a [`ForwardFailure`]
//! - Every failure is a 500 regardless of what the upstream returned

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::upstream::UpstreamError;

/// `{ success, data | error }` wrapper used by the templated routes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn success(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(err: &UpstreamError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(err.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        if self.success {
            StatusCode::OK
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Error body used by the wildcard forwarder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForwardFailure {
    pub error: &'static str,
    pub details: String,
}

impl ForwardFailure {
    pub const MESSAGE: &'static str = "Failed to fetch data";

    pub fn new(err: &UpstreamError) -> Self {
        Self {
            error: Self::MESSAGE,
            details: err.to_string(),
        }
    }
}

impl IntoResponse for ForwardFailure {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}
