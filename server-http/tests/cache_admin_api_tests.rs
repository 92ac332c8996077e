mod common;

use axum::http::StatusCode;
use common::create_test_app;
use serde_json::json;

#[tokio::test]
async fn test_cache_admin_requires_token() {
    let app = create_test_app().await;

    assert_eq!(app.get("/api/admin/cache/stats").await.status, StatusCode::UNAUTHORIZED);
    let flush = app.request("DELETE", "/api/admin/cache", None, None).await;
    assert_eq!(flush.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_stats_report_each_tier() {
    let app = create_test_app().await;
    let token = app.login().await;

    app.get("/api/news").await;
    app.get("/api/news").await;
    app.get("/api/items").await;
    app.get("/api/education").await;

    let stats = app
        .request("GET", "/api/admin/cache/stats", None, Some(&token))
        .await
        .json();

    assert_eq!(stats["short"]["keys"], 1);
    assert_eq!(stats["short"]["hits"], 1);
    assert_eq!(stats["short"]["misses"], 1);
    assert_eq!(stats["short"]["ttlSeconds"], 60);
    assert_eq!(stats["medium"]["keys"], 1);
    assert_eq!(stats["medium"]["ttlSeconds"], 300);
    assert_eq!(stats["long"]["keys"], 1);
    assert_eq!(stats["long"]["ttlSeconds"], 3600);
}

#[tokio::test]
async fn test_invalidate_by_pattern() {
    let app = create_test_app().await;
    let token = app.login().await;

    app.get("/api/photos").await;
    app.get("/api/photos?page=1").await;
    app.get("/api/videos").await;

    let response = app
        .request(
            "POST",
            "/api/admin/cache/invalidate",
            Some(json!({ "pattern": "GET:/api/photos*" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "pattern": "GET:/api/photos*", "removed": 2 }));

    assert_eq!(app.get("/api/photos").await.cache_state(), "MISS");
    assert_eq!(app.get("/api/videos").await.cache_state(), "HIT");
}

#[tokio::test]
async fn test_invalidate_rejects_empty_pattern() {
    let app = create_test_app().await;
    let token = app.login().await;

    let response = app
        .request(
            "POST",
            "/api/admin/cache/invalidate",
            Some(json!({ "pattern": "" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_flush_reports_removed_entries() {
    let app = create_test_app().await;
    let token = app.login().await;

    app.get("/api/news").await;
    app.get("/api/items").await;
    app.get("/api/designs").await;

    let flushed = app.request("DELETE", "/api/admin/cache", None, Some(&token)).await;
    assert_eq!(flushed.status, StatusCode::OK);
    assert_eq!(flushed.json()["removed"], 3);
    assert!(app.state.cache.is_empty());

    let again = app.request("DELETE", "/api/admin/cache", None, Some(&token)).await;
    assert_eq!(again.json()["removed"], 0);
}

#[tokio::test]
async fn test_query_order_shares_cache_key() {
    let app = create_test_app().await;

    assert_eq!(app.get("/api/items?b=2&a=1").await.cache_state(), "MISS");
    assert_eq!(app.get("/api/items?a=1&b=2").await.cache_state(), "HIT");
}
