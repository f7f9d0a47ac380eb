//! Timetable read and write tests.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_teacher_saves_and_student_reads() {
    let app = TestApp::new();
    app.create_user("t1", "bo@school.test", "welcome1", "teacher")
        .await;
    app.create_user("u1", "ana@school.test", "welcome1", "student")
        .await;
    let teacher = app.login("bo@school.test", "welcome1").await;
    let student = app.login("ana@school.test", "welcome1").await;

    let schedule = json!({"monday": ["maths", "art"], "tuesday": ["history"]});
    let response = app
        .request(
            "POST",
            "/timetable",
            Some(json!({"class_id": "FirstA", "schedule": schedule})),
            Some(&teacher),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Timetable saved");

    let stored = app
        .document("school/s1/classes/FirstA/timetable", "current_schedule")
        .await
        .unwrap();
    assert_eq!(stored["updated_by"], "t1");

    let response = app
        .request("GET", "/timetable?class_id=FirstA", None, Some(&student))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["class_id"], "FirstA");
    assert_eq!(response.body["timetable"]["schedule"], schedule);
}

#[tokio::test]
async fn test_student_cannot_save() {
    let app = TestApp::new();
    app.create_user("u1", "ana@school.test", "welcome1", "student")
        .await;
    let token = app.login("ana@school.test", "welcome1").await;

    let response = app
        .request(
            "POST",
            "/timetable",
            Some(json!({"class_id": "FirstA", "schedule": {}})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_missing_timetable() {
    let app = TestApp::new();
    app.create_user("u1", "ana@school.test", "welcome1", "student")
        .await;
    let token = app.login("ana@school.test", "welcome1").await;

    let response = app
        .request("GET", "/timetable?class_id=FirstA", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.request("GET", "/timetable", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
