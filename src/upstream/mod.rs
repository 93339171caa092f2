//! Upstream API access.
//!
//! # Data Flow
//! ```text
//! ResolvedRequest / wildcard URL
//!     → client.rs (one GET, no retry)
//!     → 2xx + JSON  → serde_json::Value
//!     → otherwise   → UpstreamError (Status | Body | Network)
//! ```

pub mod client;

pub use client::{UpstreamClient, UpstreamError};
