//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use schoolhub_core::config::AppConfig;
use schoolhub_core::traits::DocumentStore;
use schoolhub_database::MemoryDocumentStore;
use schoolhub_entity::user::USERS_COLLECTION;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store for direct reads and seeding
    pub store: Arc<MemoryDocumentStore>,
}

impl TestApp {
    /// Create a new test application over an empty memory store
    pub fn new() -> Self {
        let store = Arc::new(MemoryDocumentStore::new());
        let state = schoolhub_api::build_state(AppConfig::default(), store.clone());
        let router = schoolhub_api::build_router(state);
        Self { router, store }
    }

    /// Write a document directly to the store
    pub async fn seed(&self, collection: &str, id: &str, fields: Value) {
        let fields = fields.as_object().cloned().expect("seed fields must be an object");
        self.store
            .set_document(collection, id, fields)
            .await
            .expect("Failed to seed document");
    }

    /// Create a user with the given role in school `s1`
    pub async fn create_user(&self, id: &str, email: &str, password: &str, role: &str) {
        self.seed(
            USERS_COLLECTION,
            id,
            json!({
                "email": email,
                "password": password,
                "user_role": role,
                "school_id": "s1",
                "is_new": true,
                "enrolled_subjects": [],
            }),
        )
        .await;
    }

    /// Read a document directly from the store
    pub async fn document(&self, collection: &str, id: &str) -> Option<Value> {
        self.store
            .get_document(collection, id)
            .await
            .expect("Failed to read document")
            .map(|doc| Value::Object(doc.fields))
    }

    /// Login and return the bearer token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/login",
                Some(json!({"email": email, "password": password})),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
            .body
            .get("token")
            .and_then(|v| v.as_str())
            .expect("No token in login response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
