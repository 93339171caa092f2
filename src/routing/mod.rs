//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     table.rs ENDPOINTS
//!     → template.rs (parse `:name` placeholders, axum route paths)
//!     → http::templated registers one route per distinct pattern
//!
//! Per request:
//!     pattern + path params + caller query
//!     → resolver.rs (substitute, overlay defaults)
//!     → ResolvedRequest { url }
//! ```
//!
//! # Design Decisions
//! - Table is a static constant, immutable at runtime
//! - Deterministic: same input always resolves to the same URL

pub mod resolver;
pub mod table;
pub mod template;

pub use resolver::{ResolvedRequest, Resolver, ResolverError};
pub use table::{Endpoint, ENDPOINTS};
pub use template::PathTemplate;
