//! User repository implementation.

use std::sync::Arc;

use serde_json::Value;

use schoolhub_core::result::AppResult;
use schoolhub_core::traits::DocumentStore;
use schoolhub_core::types::{Document, Fields};
use schoolhub_entity::user::{USERS_COLLECTION, User};

/// Repository for user lookups and updates.
#[derive(Debug, Clone)]
pub struct UserRepository {
    store: Arc<dyn DocumentStore>,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Find the raw user document by id.
    pub async fn find_document(&self, id: &str) -> AppResult<Option<Document>> {
        self.store.get_document(USERS_COLLECTION, id).await
    }

    /// Find a user by id.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        self.find_document(id)
            .await?
            .map(|doc| User::from_document(&doc))
            .transpose()
    }

    /// Find the first user whose email matches exactly.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let docs = self
            .store
            .query_equals(
                USERS_COLLECTION,
                "email",
                &Value::String(email.to_string()),
                Some(1),
            )
            .await?;

        docs.first().map(User::from_document).transpose()
    }

    /// Merge fields into a user document.
    pub async fn update_fields(&self, id: &str, fields: Fields) -> AppResult<()> {
        self.store.update_fields(USERS_COLLECTION, id, fields).await
    }
}
