//! Catch-all forwarder.
//!
//! Everything after the local prefix is appended verbatim to the upstream
//! base URL. The inbound query string is dropped unless
//! `routes.forward_wildcard_query` is set.

use std::time::Instant;

use axum::{
    extract::{Path, State},
    http::Uri,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::http::response::ForwardFailure;
use crate::http::server::AppState;
use crate::observability::metrics;

const ROUTE_NAME: &str = "wildcard";

pub fn register_wildcard(router: Router<AppState>, prefix: &str) -> Router<AppState> {
    let router = router.route(&format!("{prefix}/{{*rest}}"), get(forward_any));
    // A catch-all never matches an empty remainder. With no prefix, `/` is the health check.
    if prefix.is_empty() {
        router
    } else {
        router.route(&format!("{prefix}/"), get(forward_root))
    }
}

/// Join the base and the captured remainder, plus the query if enabled.
pub fn upstream_target(base: &str, rest: &str, query: Option<&str>) -> String {
    let mut target = format!("{}/{}", base.trim_end_matches('/'), rest);
    if let Some(q) = query.filter(|q| !q.is_empty()) {
        target.push('?');
        target.push_str(q);
    }
    target
}

async fn forward_any(State(state): State<AppState>, Path(rest): Path<String>, uri: Uri) -> Response {
    forward(state, &rest, &uri).await
}

async fn forward_root(State(state): State<AppState>, uri: Uri) -> Response {
    forward(state, "", &uri).await
}

async fn forward(state: AppState, rest: &str, uri: &Uri) -> Response {
    let start = Instant::now();
    let query = if state.forward_wildcard_query {
        uri.query()
    } else {
        None
    };
    let target = upstream_target(&state.upstream_base, rest, query);

    tracing::debug!(upstream = %target, "Forwarding request");

    let response = match state.upstream.fetch_json(target.as_str()).await {
        Ok(body) => Json(body).into_response(),
        Err(e) => {
            tracing::warn!(
                upstream = %target,
                kind = e.kind(),
                error = %e,
                "Upstream request failed"
            );
            metrics::record_upstream_error(e.kind());
            ForwardFailure::new(&e).into_response()
        }
    };

    metrics::record_request(ROUTE_NAME, response.status().as_u16(), start);
    response
}
