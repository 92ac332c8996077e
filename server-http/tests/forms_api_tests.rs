mod common;

use axum::http::StatusCode;
use common::{RecordingMailer, create_test_app, create_test_app_with_mailer};
use serde_json::json;

#[tokio::test]
async fn test_contact_stores_and_notifies() {
    let app = create_test_app().await;

    let response = app
        .request(
            "POST",
            "/api/contact",
            Some(json!({
                "name": "Ada",
                "email": "Ada@Example.org",
                "subject": "Commission",
                "message": "We would like a library."
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.json()["email"], "ada@example.org");
    assert_eq!(response.json()["isRead"], false);

    let sent = app.mailer.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "office@atrium.test");
    assert_eq!(sent[0].reply_to.as_deref(), Some("ada@example.org"));
    assert_eq!(sent[0].subject, "[Contact] Commission");
}

#[tokio::test]
async fn test_contact_survives_mail_failure() {
    let app = create_test_app_with_mailer(RecordingMailer {
        fail: true,
        ..Default::default()
    })
    .await;

    let response = app
        .request(
            "POST",
            "/api/contact",
            Some(json!({ "name": "Ada", "email": "ada@example.org", "message": "Hello" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let token = app.login().await;
    let inbox = app.request("GET", "/api/contact", None, Some(&token)).await.json();
    assert_eq!(inbox.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_contact_validation_and_admin_flow() {
    let app = create_test_app().await;

    let invalid = app
        .request(
            "POST",
            "/api/contact",
            Some(json!({ "name": "Ada", "email": "not-an-email", "message": "Hi" })),
            None,
        )
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert!(app.mailer.sent.lock().unwrap().is_empty());

    let created = app
        .request(
            "POST",
            "/api/contact",
            Some(json!({ "name": "Ada", "email": "ada@example.org", "message": "Hi" })),
            None,
        )
        .await;
    let id = created.json()["id"].as_i64().unwrap();

    // Reading the inbox is admin only.
    assert_eq!(app.get("/api/contact").await.status, StatusCode::UNAUTHORIZED);

    let token = app.login().await;
    let read = app
        .request("PATCH", &format!("/api/contact/{}/read", id), None, Some(&token))
        .await;
    assert_eq!(read.status, StatusCode::OK);
    assert_eq!(read.json()["isRead"], true);

    let uri = format!("/api/contact/{}", id);
    assert_eq!(
        app.request("DELETE", &uri, None, Some(&token)).await.status,
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        app.request("DELETE", &uri, None, Some(&token)).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_newsletter_subscription_lifecycle() {
    let app = create_test_app().await;

    let first = app
        .request(
            "POST",
            "/api/newsletter/subscribe",
            Some(json!({ "email": "reader@example.org", "name": "Reader" })),
            None,
        )
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    // Subscribing twice keeps a single row.
    let second = app
        .request(
            "POST",
            "/api/newsletter/subscribe",
            Some(json!({ "email": "READER@example.org" })),
            None,
        )
        .await;
    assert_eq!(second.status, StatusCode::CREATED);
    assert_eq!(second.json()["id"], first.json()["id"]);
    assert_eq!(second.json()["name"], "Reader");

    let token = app.login().await;
    let subscribers = app
        .request("GET", "/api/newsletter/subscribers", None, Some(&token))
        .await
        .json();
    assert_eq!(subscribers.as_array().unwrap().len(), 1);

    let unsubscribed = app
        .request(
            "POST",
            "/api/newsletter/unsubscribe",
            Some(json!({ "email": "reader@example.org" })),
            None,
        )
        .await;
    assert_eq!(unsubscribed.status, StatusCode::OK);

    let subscribers = app
        .request("GET", "/api/newsletter/subscribers", None, Some(&token))
        .await
        .json();
    assert!(subscribers.as_array().unwrap().is_empty());

    let unknown = app
        .request(
            "POST",
            "/api/newsletter/unsubscribe",
            Some(json!({ "email": "stranger@example.org" })),
            None,
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_involved_submissions() {
    let app = create_test_app().await;

    let no_amount = app
        .request(
            "POST",
            "/api/get-involved/donations",
            Some(json!({ "name": "Ada", "email": "ada@example.org" })),
            None,
        )
        .await;
    assert_eq!(no_amount.status, StatusCode::BAD_REQUEST);
    assert_eq!(no_amount.json()["error"], "amount must be a positive number");

    let donation = app
        .request(
            "POST",
            "/api/get-involved/donations",
            Some(json!({ "name": "Ada", "email": "ada@example.org", "amount": 50.0 })),
            None,
        )
        .await;
    assert_eq!(donation.status, StatusCode::CREATED);
    assert_eq!(donation.json()["kind"], "donation");
    assert_eq!(donation.json()["status"], "pending");

    let idea = app
        .request(
            "POST",
            "/api/get-involved/ideas",
            Some(json!({ "name": "Lin", "email": "lin@example.org", "message": "Roof garden" })),
            None,
        )
        .await;
    assert_eq!(idea.status, StatusCode::CREATED);

    assert_eq!(app.get("/api/get-involved").await.status, StatusCode::UNAUTHORIZED);

    let token = app.login().await;
    let all = app.request("GET", "/api/get-involved", None, Some(&token)).await.json();
    assert_eq!(all.as_array().unwrap().len(), 2);

    let donations = app
        .request("GET", "/api/get-involved?kind=donation", None, Some(&token))
        .await
        .json();
    assert_eq!(donations.as_array().unwrap().len(), 1);

    let id = donation.json()["id"].as_i64().unwrap();
    let status_uri = format!("/api/get-involved/entry/{}/status", id);

    let bad_status = app
        .request("PATCH", &status_uri, Some(json!({ "status": "archived" })), Some(&token))
        .await;
    assert_eq!(bad_status.status, StatusCode::BAD_REQUEST);

    let accepted = app
        .request("PATCH", &status_uri, Some(json!({ "status": "accepted" })), Some(&token))
        .await;
    assert_eq!(accepted.status, StatusCode::OK);
    assert_eq!(accepted.json()["status"], "accepted");

    let pending = app
        .request("GET", "/api/get-involved?status=pending", None, Some(&token))
        .await
        .json();
    assert_eq!(pending.as_array().unwrap().len(), 1);

    let entry_uri = format!("/api/get-involved/entry/{}", id);
    assert_eq!(
        app.request("DELETE", &entry_uri, None, Some(&token)).await.status,
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        app.request("GET", &entry_uri, None, Some(&token)).await.status,
        StatusCode::NOT_FOUND
    );
}
