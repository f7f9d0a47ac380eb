//! Login, logout and bearer-token authentication tests.

use chrono::{Duration, Utc};
use http::StatusCode;
use serde_json::json;

use schoolhub_entity::session::SESSIONS_COLLECTION;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();
    app.create_user("u1", "ana@school.test", "welcome1", "student")
        .await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(json!({"email": "ana@school.test", "password": "welcome1"})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Login successful");
    assert_eq!(response.body["user"]["id"], "u1");
    assert_eq!(response.body["user"]["is_new"], true);
    assert!(response.body["expiresAt"].is_string());

    let token = response.body["token"].as_str().unwrap();
    let session = app.document(SESSIONS_COLLECTION, token).await.unwrap();
    assert_eq!(session["user_id"], "u1");
    assert_eq!(session["active"], true);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new();
    app.create_user("u1", "ana@school.test", "welcome1", "student")
        .await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(json!({"email": "ana@school.test", "password": "nope"})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_unknown_email_matches_wrong_password() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/login",
            Some(json!({"email": "ghost@school.test", "password": "welcome1"})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/login",
            Some(json!({"email": "", "password": ""})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_mistyped_body_uses_error_shape() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/login",
            Some(json!({"email": 5, "password": "x"})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "BAD_REQUEST");
    assert!(response.body["message"].is_string());

    let response = app.request("POST", "/login", None, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_second_login_invalidates_first() {
    let app = TestApp::new();
    app.create_user("u1", "ana@school.test", "welcome1", "student")
        .await;

    let first = app.login("ana@school.test", "welcome1").await;
    let second = app.login("ana@school.test", "welcome1").await;
    assert_ne!(first, second);

    let response = app.request("GET", "/profile", None, Some(&first)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["message"], "Session invalidated");

    let response = app.request("GET", "/profile", None, Some(&second)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_missing_token() {
    let app = TestApp::new();

    let response = app.request("GET", "/profile", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_token() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/profile", None, Some("not-a-session"))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["message"], "Invalid token");
}

#[tokio::test]
async fn test_expired_session_is_deactivated() {
    let app = TestApp::new();
    app.create_user("u1", "ana@school.test", "welcome1", "student")
        .await;
    let expired = (Utc::now() - Duration::minutes(5)).to_rfc3339();
    app.seed(
        SESSIONS_COLLECTION,
        "stale-token",
        json!({
            "token": "stale-token",
            "user_id": "u1",
            "expires_at": expired,
            "active": true,
        }),
    )
    .await;

    let response = app
        .request("GET", "/profile", None, Some("stale-token"))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["message"], "Session expired");

    let session = app
        .document(SESSIONS_COLLECTION, "stale-token")
        .await
        .unwrap();
    assert_eq!(session["active"], false);
}

#[tokio::test]
async fn test_logout_then_token_rejected() {
    let app = TestApp::new();
    app.create_user("u1", "ana@school.test", "welcome1", "student")
        .await;
    let token = app.login("ana@school.test", "welcome1").await;

    let response = app.request("POST", "/logout", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Logged out successfully");

    let response = app.request("GET", "/profile", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_logout_always_succeeds() {
    let app = TestApp::new();

    let response = app.request("POST", "/logout", None, None).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("POST", "/logout", None, Some("unknown-token"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}
