//! End-to-end tests for the HTTP surface.
//!
//! Each test runs the real router on an ephemeral port, backed by a
//! temporary SQLite file, and serves target pages from a mockito server.

use std::net::SocketAddr;
use std::sync::Arc;

use seo_optimizer::{
    db,
    repository::sqlite::AnalysisRepository,
    routes,
    service::{HttpFetcher, SeoService},
};
use serde_json::Value;
use tempfile::TempDir;

const SCENARIO_HTML: &str = r#"<html><head><title>T</title><meta name="description" content="d"></head><body><h1>H</h1><img src="x.png" alt="a"></body></html>"#;

struct TestApp {
    addr: SocketAddr,
    client: reqwest::Client,
    _dir: TempDir,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn analyze(&self, target: &str) -> reqwest::Response {
        self.client
            .post(self.url("/analyze"))
            .json(&serde_json::json!({ "url": target }))
            .send()
            .await
            .expect("analyze request failed")
    }
}

/// Starts the service against a fresh database.
async fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let pool = db::init_db(&dir.path().join("seo_analysis.db"))
        .await
        .expect("Failed to init db");

    let service = SeoService::new(
        Arc::new(HttpFetcher::with_defaults().expect("Failed to build fetcher")),
        Arc::new(AnalysisRepository::new(pool)),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, routes::router(service))
            .await
            .expect("server died");
    });

    TestApp {
        addr,
        client: reqwest::Client::new(),
        _dir: dir,
    }
}

async fn serve_page(server: &mut mockito::ServerGuard, path: &str, body: &str) -> mockito::Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(body)
        .create_async()
        .await
}

#[tokio::test]
async fn test_home_reports_running() {
    let app = spawn_app().await;

    let body = app
        .client
        .get(app.url("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert_eq!(body, "SEO Optimizer is running");
}

#[tokio::test]
async fn test_analyze_scores_scenario_page() {
    let app = spawn_app().await;
    let mut server = mockito::Server::new_async().await;
    let _page = serve_page(&mut server, "/", SCENARIO_HTML).await;

    let response = app.analyze(&format!("{}/", server.url())).await;
    assert_eq!(response.status(), 200);

    let raw = response.text().await.unwrap();
    let json: Value = serde_json::from_str(&raw).unwrap();

    // title 10 + description 10 + h1 5 + alt 5; mock server is plain http
    assert_eq!(json["seo_score"], 30);

    let checks = json["seo_checks"].as_object().unwrap();
    assert_eq!(checks.len(), 12);
    assert_eq!(checks["Title Tag"], "✅ Present");
    assert_eq!(checks["Meta Description"], "✅ Present");
    assert_eq!(checks["H1 Tag"], "✅ Present (1 H1)");
    assert_eq!(checks["Image Alt Attributes"], "✅ All images have alt tags.");
    assert_eq!(checks["HTTPS"], "❌ Insecure HTTP used.");
    assert_eq!(checks["Canonical Tag"], "❌ Missing - Add a canonical tag.");

    // keys go out sorted
    let positions: Vec<usize> = ["Canonical Tag", "H1 Tag", "HTTPS", "Title Tag", "Viewport Tag"]
        .iter()
        .map(|k| raw.find(&format!("\"{}\"", k)).expect("key in body"))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{raw}");
}

#[tokio::test]
async fn test_analyze_rejects_script_rendered_page() {
    let app = spawn_app().await;
    let mut server = mockito::Server::new_async().await;
    let _page = serve_page(
        &mut server,
        "/app",
        r#"<html><head><script src="/bundle.js"></script></head><body><div id="root"></div></body></html>"#,
    )
    .await;

    let response = app.analyze(&format!("{}/app", server.url())).await;
    assert_eq!(response.status(), 400);

    let json: Value = response.json().await.unwrap();
    assert_eq!(
        json["error"],
        "This page may require JavaScript to load. SEO data unavailable."
    );

    let history: Vec<Value> = app
        .client
        .get(app.url("/history"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(history.is_empty(), "rejected pages are not recorded");
}

#[tokio::test]
async fn test_analyze_unreachable_host_is_server_error() {
    let app = spawn_app().await;

    // grab a free port, then release it so nothing is listening
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let response = app.analyze(&format!("http://127.0.0.1:{}/", port)).await;
    assert_eq!(response.status(), 500);

    let json: Value = response.json().await.unwrap();
    let message = json["error"].as_str().unwrap();
    assert!(message.starts_with("Network error"), "{message}");
}

#[tokio::test]
async fn test_analyze_malformed_body_is_client_error() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/analyze"))
        .header("content-type", "application/json")
        .body(r#"{"address": "https://example.com"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let json: Value = response.json().await.unwrap();
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_history_returns_ten_newest_first() {
    let app = spawn_app().await;
    let mut server = mockito::Server::new_async().await;

    for i in 0..12 {
        let path = format!("/page{}", i);
        let html = format!(
            r#"<html><head><title>Page {}</title><meta name="description" content="d"></head></html>"#,
            i
        );
        let _m = serve_page(&mut server, &path, &html).await;
        let response = app.analyze(&format!("{}{}", server.url(), path)).await;
        assert_eq!(response.status(), 200);
    }

    let history: Vec<Value> = app
        .client
        .get(app.url("/history"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(history.len(), 10);
    assert_eq!(history[0]["title"], "Page 11");
    assert_eq!(history[9]["title"], "Page 2");
    assert_eq!(history[0]["url"], format!("{}/page11", server.url()));
    assert_eq!(history[0]["score"], 25);

    let entry = history[0].as_object().unwrap();
    let mut keys: Vec<&str> = entry.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["created_at", "score", "title", "url"]);

    let created_at = entry["created_at"].as_str().unwrap();
    assert!(
        chrono::DateTime::parse_from_rfc3339(created_at).is_ok(),
        "created_at should be ISO-8601: {created_at}"
    );
}

#[tokio::test]
async fn test_clear_history_reports_deleted_count() {
    let app = spawn_app().await;

    let empty: Value = app
        .client
        .delete(app.url("/clear-history"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(empty["message"], "Deleted 0 records.");

    let mut server = mockito::Server::new_async().await;
    let _page = serve_page(&mut server, "/", SCENARIO_HTML).await;
    for _ in 0..2 {
        assert_eq!(app.analyze(&format!("{}/", server.url())).await.status(), 200);
    }

    let response = app
        .client
        .delete(app.url("/clear-history"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let cleared: Value = response.json().await.unwrap();
    assert_eq!(cleared["message"], "Deleted 2 records.");

    let history: Vec<Value> = app
        .client
        .get(app.url("/history"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/history"))
        .header("origin", "http://localhost:3000")
        .send()
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
