//! Upstream URL resolution.
//!
//! # Responsibilities
//! - Substitute path parameters into a pattern
//! - Overlay caller query values on the pattern's defaults
//! - Produce the fully-qualified upstream URL
//!
//! # Design Decisions
//! - Infallible once constructed: bad input yields a well-formed URL the
//!   upstream will reject, never an error here
//! - Defaults keep table order; caller-only keys follow in arrival order
//! - Query serialization is `application/x-www-form-urlencoded`

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;
use url::Url;

use crate::routing::table::default_query;
use crate::routing::template::{PathTemplate, RenderedSegment, PARAM_SENTINEL};

#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("invalid upstream base URL: {0}")]
    Parse(#[from] url::ParseError),

    #[error("upstream base URL `{0}` cannot carry a path")]
    CannotBeABase(String),
}

/// A concrete upstream request target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    pub url: Url,
}

impl ResolvedRequest {
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for ResolvedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// Builds upstream URLs from patterns against a fixed base.
#[derive(Debug, Clone)]
pub struct Resolver {
    base: Url,
}

impl Resolver {
    pub fn new(base_url: &str) -> Result<Self, ResolverError> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(ResolverError::CannotBeABase(base_url.to_string()));
        }
        Ok(Self { base })
    }

    /// Resolve `pattern` with path parameter values and caller query pairs.
    pub fn resolve(
        &self,
        pattern: &str,
        path_params: &HashMap<String, String>,
        query: &[(String, String)],
    ) -> ResolvedRequest {
        let template = PathTemplate::parse(pattern);
        let mut url = self.base.clone();

        // `new` rejected cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            for segment in template.render(path_params) {
                match segment {
                    RenderedSegment::Literal(text) | RenderedSegment::Value(text) => {
                        path.push(text);
                    }
                    RenderedSegment::Unbound(name) => {
                        path.push(&format!("{PARAM_SENTINEL}{name}"));
                    }
                }
            }
        }

        let final_query = overlay_query(default_query(pattern), query);
        if !final_query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(final_query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        ResolvedRequest { url }
    }
}

/// Defaults overlaid by caller pairs. A caller key that already exists
/// replaces the value in place; later duplicates win.
pub fn overlay_query(
    defaults: &[(&str, &str)],
    caller: &[(String, String)],
) -> Vec<(String, String)> {
    let mut merged: Vec<(String, String)> = defaults
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();

    for (key, value) in caller {
        match merged.iter_mut().find(|(k, _)| k == key) {
            Some(existing) => existing.1.clone_from(value),
            None => merged.push((key.clone(), value.clone())),
        }
    }
    merged
}
