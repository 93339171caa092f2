//! End-to-end tests for the endpoint-table proxy.

use anime_api_proxy::routing::ENDPOINTS;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_success_is_wrapped_in_envelope() {
    let upstream = common::start_echo_backend().await;
    let (proxy, shutdown) = common::start_proxy(common::config_for(upstream)).await;

    let res = common::client()
        .get(format!("http://{proxy}/api/v1/animes/genre/action"))
        .send()
        .await
        .expect("Proxy unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(common::allow_origin(&res), Some("*"));
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "success": true,
            "data": { "path": "/api/v1/animes/genre/action", "query": "page=1" }
        })
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_stream_defaults_and_overrides() {
    let upstream = common::start_echo_backend().await;
    let (proxy, shutdown) = common::start_proxy(common::config_for(upstream)).await;
    let client = common::client();

    let body: Value = client
        .get(format!("http://{proxy}/api/v1/stream"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["query"], "type=sub&server=hd-2");

    let body: Value = client
        .get(format!("http://{proxy}/api/v1/stream?server=hd-1&id=ep-12"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["query"], "type=sub&server=hd-1&id=ep-12");

    shutdown.trigger();
}

#[tokio::test]
async fn test_caller_page_overrides_default() {
    let upstream = common::start_echo_backend().await;
    let (proxy, shutdown) = common::start_proxy(common::config_for(upstream)).await;

    let body: Value = common::client()
        .get(format!("http://{proxy}/api/v1/search?keyword=one%20piece&page=2"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["path"], "/api/v1/search");
    assert_eq!(body["data"]["query"], "page=2&keyword=one+piece");

    shutdown.trigger();
}

#[tokio::test]
async fn test_upstream_404_becomes_500() {
    let upstream = common::start_programmable_backend(|_| (404, r#"{"message":"gone"}"#.into())).await;
    let (proxy, shutdown) = common::start_proxy(common::config_for(upstream)).await;

    let res = common::client()
        .get(format!("http://{proxy}/api/v1/anime/does-not-exist"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    assert_eq!(common::allow_origin(&res), Some("*"));
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "success": false, "error": "Failed fetch: 404" }));

    shutdown.trigger();
}

#[tokio::test]
async fn test_non_json_body_is_failure() {
    let upstream = common::start_programmable_backend(|_| (200, "<html>maintenance</html>".into())).await;
    let (proxy, shutdown) = common::start_proxy(common::config_for(upstream)).await;

    let res = common::client()
        .get(format!("http://{proxy}/api/v1/home"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body.get("data").is_none());
    assert!(!body["error"].as_str().unwrap().is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_unreachable_upstream_is_failure() {
    let upstream = common::dead_address().await;
    let (proxy, shutdown) = common::start_proxy(common::config_for(upstream)).await;

    let res = common::client()
        .get(format!("http://{proxy}/api/v1/servers"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    assert_eq!(common::allow_origin(&res), Some("*"));
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);

    shutdown.trigger();
}

#[tokio::test]
async fn test_health_check_without_upstream() {
    let upstream = common::dead_address().await;
    let (proxy, shutdown) = common::start_proxy(common::config_for(upstream)).await;

    let res = common::client().get(format!("http://{proxy}/")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(common::allow_origin(&res), Some("*"));
    assert!(!res.text().await.unwrap().is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_every_table_entry_is_routed() {
    let upstream = common::start_echo_backend().await;
    let (proxy, shutdown) = common::start_proxy(common::config_for(upstream)).await;
    let client = common::client();

    for endpoint in ENDPOINTS {
        let local = endpoint
            .pattern
            .split('/')
            .map(|s| if s.starts_with(':') { "x" } else { s })
            .collect::<Vec<_>>()
            .join("/");

        let res = client
            .get(format!("http://{proxy}/api/v1{local}"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200, "{} ({local})", endpoint.name);

        let body: Value = res.json().await.unwrap();
        assert_eq!(body["data"]["path"], format!("/api/v1{local}"), "{}", endpoint.name);
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_trailing_slash_is_accepted() {
    let upstream = common::start_echo_backend().await;
    let (proxy, shutdown) = common::start_proxy(common::config_for(upstream)).await;
    let client = common::client();

    let res = client.get(format!("http://{proxy}/api/v1/home/")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["data"]["path"], "/api/v1/home");

    let body: Value = client
        .get(format!("http://{proxy}/api/v1/anime/naruto/?page=3"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["path"], "/api/v1/anime/naruto");

    shutdown.trigger();
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let upstream = common::start_echo_backend().await;
    let (proxy, shutdown) = common::start_proxy(common::config_for(upstream)).await;

    let res = common::client()
        .get(format!("http://{proxy}/api/v1/not-a-table-entry"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    shutdown.trigger();
}

#[tokio::test]
async fn test_concurrent_requests() {
    let upstream = common::start_echo_backend().await;
    let (proxy, shutdown) = common::start_proxy(common::config_for(upstream)).await;
    let client = common::client();

    let mut tasks = Vec::new();
    for i in 0..20 {
        let client = client.clone();
        let url = format!("http://{proxy}/api/v1/episodes/show-{i}");
        tasks.push(tokio::spawn(async move {
            let body: Value = client.get(&url).send().await.unwrap().json().await.unwrap();
            (i, body)
        }));
    }

    for task in tasks {
        let (i, body) = task.await.unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["path"], format!("/api/v1/episodes/show-{i}"));
    }

    shutdown.trigger();
}
