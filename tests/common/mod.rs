//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use anime_api_proxy::{HttpServer, ProxyConfig, Shutdown};
use axum::http::{header, StatusCode, Uri};
use axum::Router;
use serde_json::json;
use tokio::net::TcpListener;

/// Start a mock upstream whose reply is computed from the request URI.
pub async fn start_programmable_backend<F>(f: F) -> SocketAddr
where
    F: Fn(&Uri) -> (u16, String) + Send + Sync + 'static,
{
    let f = Arc::new(f);
    let app = Router::new().fallback(move |uri: Uri| {
        let f = f.clone();
        async move {
            let (status, body) = f(&uri);
            (
                StatusCode::from_u16(status).unwrap(),
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Mock upstream that answers every GET with the path and query it saw.
pub async fn start_echo_backend() -> SocketAddr {
    start_programmable_backend(|uri| {
        let body = json!({ "path": uri.path(), "query": uri.query() });
        (200, body.to_string())
    })
    .await
}

/// An address nothing is listening on.
pub async fn dead_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Config pointed at a mock upstream's `/api/v1`.
pub fn config_for(upstream: SocketAddr) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.listener.host = "127.0.0.1".into();
    config.upstream.base_url = format!("http://{upstream}/api/v1");
    config
}

/// Start the proxy on an ephemeral port.
pub async fn start_proxy(config: ProxyConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config).unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// `Access-Control-Allow-Origin` of a response.
pub fn allow_origin(res: &reqwest::Response) -> Option<&str> {
    res.headers()
        .get("access-control-allow-origin")
        .and_then(|v| v.to_str().ok())
}
