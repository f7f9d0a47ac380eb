//! Enrolled classes endpoint tests.

use http::StatusCode;
use serde_json::json;

use schoolhub_entity::user::USERS_COLLECTION;

use crate::helpers::TestApp;

async fn seed_school(app: &TestApp) {
    app.seed(
        "school/s1/classes",
        "FirstA",
        json!({"name": "First A", "grade": 1}),
    )
    .await;
    app.seed(
        "school/s1/classes/FirstA/subjects",
        "maths",
        json!({"name": "Maths", "teacher": "t1"}),
    )
    .await;
    app.seed(
        "school/s1/classes/Closed/subjects",
        "art",
        json!({"name": "Art"}),
    )
    .await;
}

async fn enroll(app: &TestApp, enrolled: serde_json::Value) -> String {
    app.seed(
        USERS_COLLECTION,
        "u1",
        json!({
            "email": "ana@school.test",
            "password": "welcome1",
            "user_role": "student",
            "school_id": "s1",
            "enrolled_subjects": enrolled,
        }),
    )
    .await;
    app.login("ana@school.test", "welcome1").await
}

#[tokio::test]
async fn test_classes_resolve_parent() {
    let app = TestApp::new();
    seed_school(&app).await;
    let token = enroll(
        &app,
        json!([
            "/school/s1/classes/FirstA/subjects/maths",
            "maths",
            {"path": "school/s1/classes/Closed/subjects/art"},
            42
        ]),
    )
    .await;

    let response = app.request("GET", "/classes", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);

    let subjects = response.body["subjects"].as_array().unwrap();
    assert_eq!(subjects.len(), 2);

    assert_eq!(subjects[0]["id"], "maths");
    assert_eq!(subjects[0]["name"], "Maths");
    assert_eq!(
        subjects[0]["refPath"],
        "/school/s1/classes/FirstA/subjects/maths"
    );
    assert_eq!(subjects[0]["parentClass"]["id"], "FirstA");
    assert_eq!(subjects[0]["parentClass"]["name"], "First A");

    assert_eq!(subjects[1]["id"], "art");
    assert!(subjects[1]["parentClass"].is_null());
}

#[tokio::test]
async fn test_classes_empty_enrollment() {
    let app = TestApp::new();
    let token = enroll(&app, json!([])).await;

    let response = app.request("GET", "/classes", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["subjects"], json!([]));
}

#[tokio::test]
async fn test_classes_dangling_reference() {
    let app = TestApp::new();
    seed_school(&app).await;
    let token = enroll(&app, json!(["/school/s1/classes/FirstA/subjects/history"])).await;

    let response = app.request("GET", "/classes", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["subjects"], json!([]));
}

#[tokio::test]
async fn test_classes_requires_auth() {
    let app = TestApp::new();

    let response = app.request("GET", "/classes", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
