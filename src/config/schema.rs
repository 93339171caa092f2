//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upstream API the proxy forwards to when nothing else is configured.
pub const DEFAULT_UPSTREAM_BASE: &str = "https://eren-world.onrender.com/api/v1";

/// Root configuration for the proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Which routing component this process serves.
    pub mode: ProxyMode,

    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Upstream API settings.
    pub upstream: UpstreamConfig,

    /// Local route prefixes.
    pub routes: RoutesConfig,

    /// CORS header declarations.
    pub cors: CorsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ProxyConfig {
    /// Port to bind: the explicit one, or the mode's default.
    pub fn port(&self) -> u16 {
        self.listener.port.unwrap_or_else(|| self.mode.default_port())
    }

    /// Full `host:port` bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listener.host, self.port())
    }
}

/// Routing component served by the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProxyMode {
    /// Named endpoint table with default query overlay.
    #[default]
    Templated,
    /// Single catch-all that appends the remaining path to the upstream.
    Wildcard,
}

impl ProxyMode {
    pub fn default_port(self) -> u16 {
        match self {
            ProxyMode::Templated => 5000,
            ProxyMode::Wildcard => 3000,
        }
    }
}

impl fmt::Display for ProxyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyMode::Templated => f.write_str("templated"),
            ProxyMode::Wildcard => f.write_str("wildcard"),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// Port to bind. Falls back to the mode's default when unset.
    pub port: Option<u16>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: None,
        }
    }
}

/// Upstream API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL every upstream request is built on.
    pub base_url: String,

    /// Whole-request deadline for outbound calls in seconds.
    /// Unset means outbound calls may wait indefinitely.
    pub timeout_secs: Option<u64>,

    /// User-Agent sent upstream.
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_BASE.to_string(),
            timeout_secs: None,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Local route prefixes for both components.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Prefix the endpoint table is mounted under.
    pub templated_prefix: String,

    /// Prefix the catch-all forwarder listens under.
    pub wildcard_prefix: String,

    /// Append the inbound query string to wildcard upstream calls.
    pub forward_wildcard_query: bool,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            templated_prefix: "/api/v1".to_string(),
            wildcard_prefix: "/api".to_string(),
            forward_wildcard_query: false,
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Request headers declared in `Access-Control-Allow-Headers`.
    pub allowed_headers: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_headers: vec![
                "Origin".to_string(),
                "X-Requested-With".to_string(),
                "Content-Type".to_string(),
                "Accept".to_string(),
            ],
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
