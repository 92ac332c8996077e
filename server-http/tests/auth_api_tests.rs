mod common;

use axum::http::StatusCode;
use common::{ADMIN_PASSWORD, ADMIN_USERNAME, create_test_app};
use serde_json::json;

#[tokio::test]
async fn test_login_with_valid_credentials() {
    let app = create_test_app().await;
    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["username"], ADMIN_USERNAME);
    assert!(body["expiresIn"].as_u64().unwrap() > 0);
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_with_bad_credentials() {
    let app = create_test_app().await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": ADMIN_USERNAME, "password": "not-it-123" })),
            None,
        )
        .await;
    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.json()["error"], "Invalid username or password");

    let unknown_user = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "ghost", "password": ADMIN_PASSWORD })),
            None,
        )
        .await;
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);

    let malformed = app
        .request("POST", "/api/auth/login", Some(json!({ "username": 7 })), None)
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = create_test_app().await;

    let anonymous = app.get("/api/auth/me").await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let garbage = app.request("GET", "/api/auth/me", None, Some("not.a.jwt")).await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);

    let token = app.login().await;
    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.json()["username"], ADMIN_USERNAME);
    assert!(me.json().get("passwordHash").is_none());
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let app = create_test_app().await;
    let token = app.login().await;

    let logout = app.request("POST", "/api/auth/logout", None, Some(&token)).await;
    assert_eq!(logout.status, StatusCode::OK);

    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
    assert_eq!(me.json()["error"], "Token has been revoked");

    // A fresh login still works.
    let fresh = app.login().await;
    let me = app.request("GET", "/api/auth/me", None, Some(&fresh)).await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_change_password() {
    let app = create_test_app().await;
    let token = app.login().await;

    let wrong_current = app
        .request(
            "PUT",
            "/api/auth/password",
            Some(json!({ "currentPassword": "nope-1234", "newPassword": "studio2026" })),
            Some(&token),
        )
        .await;
    assert_eq!(wrong_current.status, StatusCode::UNAUTHORIZED);

    let weak = app
        .request(
            "PUT",
            "/api/auth/password",
            Some(json!({ "currentPassword": ADMIN_PASSWORD, "newPassword": "short" })),
            Some(&token),
        )
        .await;
    assert_eq!(weak.status, StatusCode::BAD_REQUEST);

    let changed = app
        .request(
            "PUT",
            "/api/auth/password",
            Some(json!({ "currentPassword": ADMIN_PASSWORD, "newPassword": "studio2026" })),
            Some(&token),
        )
        .await;
    assert_eq!(changed.status, StatusCode::OK);

    let old = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD })),
            None,
        )
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);

    let new = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": ADMIN_USERNAME, "password": "studio2026" })),
            None,
        )
        .await;
    assert_eq!(new.status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = create_test_app().await;
    let response = app.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["status"], "ok");
    assert!(response.json()["timestamp"].is_string());
}
