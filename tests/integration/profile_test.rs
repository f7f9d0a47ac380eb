//! Profile, password reset, role config and health endpoint tests.

use http::StatusCode;
use serde_json::json;

use schoolhub_entity::role_config::ROLE_CONFIGS_COLLECTION;
use schoolhub_entity::user::USERS_COLLECTION;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_profile_hides_password() {
    let app = TestApp::new();
    app.create_user("u1", "ana@school.test", "welcome1", "student")
        .await;
    let token = app.login("ana@school.test", "welcome1").await;

    let response = app.request("GET", "/profile", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["userId"], "u1");
    assert_eq!(response.body["user"]["email"], "ana@school.test");
    assert!(response.body["user"].get("password").is_none());
}

#[tokio::test]
async fn test_reset_password() {
    let app = TestApp::new();
    app.create_user("u1", "ana@school.test", "welcome1", "student")
        .await;
    let token = app.login("ana@school.test", "welcome1").await;

    let response = app
        .request(
            "POST",
            "/reset-password",
            Some(json!({"newPassword": "changed-it"})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["userId"], "u1");

    let user = app.document(USERS_COLLECTION, "u1").await.unwrap();
    assert_eq!(user["is_new"], false);

    // The current session survives a reset.
    let response = app.request("GET", "/profile", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/login",
            Some(json!({"email": "ana@school.test", "password": "welcome1"})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    app.login("ana@school.test", "changed-it").await;
}

#[tokio::test]
async fn test_reset_password_too_short() {
    let app = TestApp::new();
    app.create_user("u1", "ana@school.test", "welcome1", "student")
        .await;
    let token = app.login("ana@school.test", "welcome1").await;

    let response = app
        .request(
            "POST",
            "/reset-password",
            Some(json!({"newPassword": "abc"})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_role_config() {
    let app = TestApp::new();
    app.create_user("u1", "ana@school.test", "welcome1", "student")
        .await;
    app.seed(
        ROLE_CONFIGS_COLLECTION,
        "student",
        json!({"menu": ["classes", "timetable"]}),
    )
    .await;
    let token = app.login("ana@school.test", "welcome1").await;

    let response = app
        .request("GET", "/user-role-config", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["role_config"]["menu"],
        json!(["classes", "timetable"])
    );
}

#[tokio::test]
async fn test_role_config_missing() {
    let app = TestApp::new();
    app.create_user("u1", "bo@school.test", "welcome1", "teacher")
        .await;
    let token = app.login("bo@school.test", "welcome1").await;

    let response = app
        .request("GET", "/user-role-config", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["storage"], true);
}
