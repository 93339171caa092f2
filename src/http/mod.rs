//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → cors.rs (Access-Control-* headers on every response)
//!     → request.rs (request ID, trace span)
//!     → templated.rs | wildcard.rs (depending on mode)
//!     → upstream client (one GET)
//!     → response.rs (envelope or passthrough, 500 on failure)
//!     → Send to client
//! ```

pub mod cors;
pub mod request;
pub mod response;
pub mod server;
pub mod templated;
pub mod wildcard;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use response::{Envelope, ForwardFailure};
pub use server::{AppState, HttpServer, ServerError};
