//! Route registration for the endpoint table.
//!
//! # Responsibilities
//! - Mount one GET route per distinct table pattern under the prefix,
//!   with and without a trailing slash
//! - Extract path and query values and hand them to the resolver
//! - Wrap the upstream result in an [`Envelope`]
//!
//! # Design Decisions
//! - One generic handler, parameterized by the `&'static Endpoint`
//! - Patterns shared by several entries are mounted once; the first
//!   entry names the route

use std::collections::HashMap;
use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};

use crate::http::response::Envelope;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::table::{unique_endpoints, Endpoint};
use crate::routing::template::PathTemplate;

/// Add every table route to `router`.
pub fn register_endpoints(mut router: Router<AppState>, prefix: &str) -> Router<AppState> {
    let (endpoints, aliases) = unique_endpoints();

    for alias in aliases {
        tracing::debug!(
            name = alias.name,
            pattern = alias.pattern,
            "Endpoint shares a pattern with an earlier entry; not mounted again"
        );
    }

    for endpoint in endpoints {
        let path = format!("{prefix}{}", PathTemplate::parse(endpoint.pattern).axum_path());
        tracing::debug!(name = endpoint.name, path = %path, "Mounting endpoint");

        let handler = get(
            move |State(state): State<AppState>,
                  Path(params): Path<HashMap<String, String>>,
                  Query(query): Query<Vec<(String, String)>>| {
                forward_endpoint(state, endpoint, params, query)
            },
        );

        // Trailing slash is accepted and resolves to the same upstream URL.
        router = router
            .route(&format!("{path}/"), handler.clone())
            .route(&path, handler);
    }

    router
}

/// Resolve, fetch once, and wrap the outcome.
async fn forward_endpoint(
    state: AppState,
    endpoint: &'static Endpoint,
    params: HashMap<String, String>,
    query: Vec<(String, String)>,
) -> Envelope {
    let start = Instant::now();
    let target = state.resolver.resolve(endpoint.pattern, &params, &query);

    tracing::debug!(endpoint = endpoint.name, upstream = %target, "Forwarding request");

    let envelope = match state.upstream.fetch_json(target.url.clone()).await {
        Ok(data) => Envelope::success(data),
        Err(e) => {
            tracing::warn!(
                endpoint = endpoint.name,
                upstream = %target,
                kind = e.kind(),
                error = %e,
                "Upstream request failed"
            );
            metrics::record_upstream_error(e.kind());
            Envelope::failure(&e)
        }
    };

    metrics::record_request(endpoint.name, envelope.status().as_u16(), start);
    envelope
}
