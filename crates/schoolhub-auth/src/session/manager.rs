//! Session lifecycle manager: login, logout, and password reset.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use schoolhub_core::config::AuthConfig;
use schoolhub_core::error::AppError;
use schoolhub_core::result::AppResult;
use schoolhub_core::types::Fields;
use schoolhub_database::repositories::UserRepository;
use schoolhub_entity::session::model::token_hint;
use schoolhub_entity::user::model::CREDENTIAL_FIELD;

use crate::credential::CredentialVerifier;

use super::store::SessionStore;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Result of a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    /// The new bearer token.
    pub token: String,
    /// When the new session expires.
    pub expires_at: DateTime<Utc>,
    /// Id of the authenticated user.
    pub user_id: String,
    /// The user's first-login flag.
    pub is_new: bool,
}

/// Enforces at most one active session per user.
#[derive(Debug, Clone)]
pub struct SessionManager {
    session_store: Arc<SessionStore>,
    user_repo: Arc<UserRepository>,
    verifier: Arc<dyn CredentialVerifier>,
    auth_config: AuthConfig,
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        session_store: Arc<SessionStore>,
        user_repo: Arc<UserRepository>,
        verifier: Arc<dyn CredentialVerifier>,
        auth_config: AuthConfig,
    ) -> Self {
        Self {
            session_store,
            user_repo,
            verifier,
            auth_config,
        }
    }

    /// Performs the login flow:
    ///
    /// 1. Find the user by exact email
    /// 2. Verify the supplied password against the stored credential
    /// 3. Deactivate every active session of the user and write the new one
    ///    in a single guarded commit, so concurrent logins of the same user
    ///    leave exactly one session active
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginResult> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

        if !self.verifier.verify(&user.password, password) {
            warn!(user_id = %user.id, "Login rejected: credential mismatch");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let session = self.session_store.replace_active(&user.id).await?;

        info!(
            user_id = %user.id,
            token = %token_hint(&session.token),
            replaced_sessions = session.replaced,
            "Login successful"
        );

        Ok(LoginResult {
            expires_at: session.expires_at,
            token: session.token,
            user_id: user.id,
            is_new: user.is_new,
        })
    }

    /// Marks the session inactive.
    ///
    /// Never fails: a missing token, an unknown or already-inactive session,
    /// and storage errors are logged and otherwise ignored.
    pub async fn logout(&self, token: Option<&str>) {
        let Some(token) = token else {
            info!("Logout without a bearer token");
            return;
        };

        match self.session_store.find(token).await {
            Ok(Some(session)) if session.active => {
                match self.session_store.deactivate(token).await {
                    Ok(()) => info!(
                        user_id = %session.user_id,
                        token = %token_hint(token),
                        "Logout completed"
                    ),
                    Err(e) => warn!(
                        token = %token_hint(token),
                        error = %e,
                        "Failed to deactivate session during logout"
                    ),
                }
            }
            Ok(Some(_)) => info!(token = %token_hint(token), "Logout of inactive session"),
            Ok(None) => info!(token = %token_hint(token), "Logout of unknown token"),
            Err(e) => warn!(
                token = %token_hint(token),
                error = %e,
                "Session lookup failed during logout"
            ),
        }
    }

    /// Overwrites the stored credential and clears the first-login flag.
    /// Existing sessions stay valid.
    pub async fn reset_password(&self, user_id: &str, new_password: &str) -> AppResult<()> {
        let min = self.auth_config.password_min_length;
        if new_password.chars().count() < min {
            return Err(AppError::bad_request(format!(
                "New password must be at least {min} characters"
            )));
        }

        let credential = self.verifier.prepare(new_password)?;

        let mut fields = Fields::new();
        fields.insert(CREDENTIAL_FIELD.into(), Value::String(credential));
        fields.insert("is_new".into(), Value::Bool(false));

        self.user_repo.update_fields(user_id, fields).await?;

        info!(user_id = %user_id, "Password reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use schoolhub_core::config::SessionConfig;
    use schoolhub_core::error::ErrorKind;
    use schoolhub_core::traits::{DocumentStore, FieldMatch, GuardedWrites, WriteOp};
    use schoolhub_core::types::Document;
    use schoolhub_database::MemoryDocumentStore;
    use schoolhub_database::repositories::SessionRepository;
    use schoolhub_entity::session::SESSIONS_COLLECTION;
    use schoolhub_entity::user::USERS_COLLECTION;
    use serde_json::json;

    use crate::credential::PlaintextVerifier;

    /// Memory store that yields before every read and guarded commit, so
    /// concurrent callers interleave at the points a network backend would.
    #[derive(Debug)]
    struct SlowStore {
        inner: Arc<MemoryDocumentStore>,
    }

    impl SlowStore {
        async fn pause() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    #[async_trait]
    impl DocumentStore for SlowStore {
        async fn get_document(&self, collection: &str, id: &str) -> AppResult<Option<Document>> {
            Self::pause().await;
            self.inner.get_document(collection, id).await
        }

        async fn query_equals(
            &self,
            collection: &str,
            field: &str,
            value: &Value,
            limit: Option<usize>,
        ) -> AppResult<Vec<Document>> {
            Self::pause().await;
            self.inner.query_equals(collection, field, value, limit).await
        }

        async fn set_document(&self, collection: &str, id: &str, fields: Fields) -> AppResult<()> {
            self.inner.set_document(collection, id, fields).await
        }

        async fn update_fields(&self, collection: &str, id: &str, fields: Fields) -> AppResult<()> {
            self.inner.update_fields(collection, id, fields).await
        }

        async fn batch_commit(&self, ops: Vec<WriteOp>) -> AppResult<()> {
            Self::pause().await;
            self.inner.batch_commit(ops).await
        }

        async fn commit_guarded(
            &self,
            filter: FieldMatch,
            build: GuardedWrites,
        ) -> AppResult<Vec<Document>> {
            Self::pause().await;
            self.inner.commit_guarded(filter, build).await
        }

        async fn health_check(&self) -> AppResult<bool> {
            Ok(true)
        }
    }

    fn manager_over(store: Arc<dyn DocumentStore>) -> SessionManager {
        let session_repo = Arc::new(SessionRepository::new(store.clone()));
        SessionManager::new(
            Arc::new(SessionStore::new(session_repo, SessionConfig::default())),
            Arc::new(UserRepository::new(store)),
            Arc::new(PlaintextVerifier),
            AuthConfig::default(),
        )
    }

    async fn setup() -> (Arc<MemoryDocumentStore>, SessionManager) {
        let store = Arc::new(MemoryDocumentStore::new());
        store
            .set_document(
                USERS_COLLECTION,
                "u1",
                json!({"email": "ana@school.test", "password": "pw123456", "is_new": true})
                    .as_object()
                    .cloned()
                    .unwrap(),
            )
            .await
            .unwrap();

        let manager = manager_over(store.clone());
        (store, manager)
    }

    async fn active_sessions(store: &MemoryDocumentStore) -> Vec<String> {
        store
            .query_equals(SESSIONS_COLLECTION, "active", &json!(true), None)
            .await
            .unwrap()
            .into_iter()
            .map(|doc| doc.id)
            .collect()
    }

    #[tokio::test]
    async fn test_second_login_deactivates_first() {
        let (store, manager) = setup().await;

        let first = manager.login("ana@school.test", "pw123456").await.unwrap();
        let second = manager.login("ana@school.test", "pw123456").await.unwrap();
        assert_ne!(first.token, second.token);
        assert!(second.is_new);

        assert_eq!(active_sessions(&store).await, vec![second.token.clone()]);
        assert_eq!(store.count(SESSIONS_COLLECTION).await, 2);

        let old = store
            .get_document(SESSIONS_COLLECTION, &first.token)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(old.fields["active"], json!(false));
        assert!(old.fields["deactivated_at"].is_string());
    }

    #[tokio::test]
    async fn test_concurrent_logins_leave_one_active_session() {
        let (memory, _) = setup().await;
        let manager = manager_over(Arc::new(SlowStore {
            inner: memory.clone(),
        }));

        let (a, b) = tokio::join!(
            manager.login("ana@school.test", "pw123456"),
            manager.login("ana@school.test", "pw123456"),
        );
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_ne!(a.token, b.token);

        let active = active_sessions(&memory).await;
        assert_eq!(active.len(), 1);
        assert!(active[0] == a.token || active[0] == b.token);
        assert_eq!(memory.count(SESSIONS_COLLECTION).await, 2);
    }

    #[tokio::test]
    async fn test_wrong_password_creates_no_session() {
        let (store, manager) = setup().await;

        let err = manager.login("ana@school.test", "nope").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);

        let err = manager.login("ANA@school.test", "pw123456").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);

        assert_eq!(store.count(SESSIONS_COLLECTION).await, 0);
    }

    #[tokio::test]
    async fn test_expiry_is_one_ttl_ahead() {
        let (_, manager) = setup().await;
        let result = manager.login("ana@school.test", "pw123456").await.unwrap();
        let minutes = (result.expires_at - Utc::now()).num_minutes();
        assert!((24 * 60 - 1..=24 * 60).contains(&minutes));
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let (store, manager) = setup().await;
        let login = manager.login("ana@school.test", "pw123456").await.unwrap();

        manager.logout(Some(&login.token)).await;
        manager.logout(Some(&login.token)).await;
        manager.logout(Some("does-not-exist")).await;
        manager.logout(None).await;

        assert!(active_sessions(&store).await.is_empty());
        assert!(store.get_document(SESSIONS_COLLECTION, "does-not-exist").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reset_password_keeps_sessions() {
        let (store, manager) = setup().await;
        let login = manager.login("ana@school.test", "pw123456").await.unwrap();

        manager.reset_password("u1", "fresh-secret").await.unwrap();

        let user = store.get_document(USERS_COLLECTION, "u1").await.unwrap().unwrap();
        assert_eq!(user.fields["password"], json!("fresh-secret"));
        assert_eq!(user.fields["is_new"], json!(false));
        assert_eq!(active_sessions(&store).await, vec![login.token]);

        assert!(manager.login("ana@school.test", "fresh-secret").await.is_ok());
    }

    #[tokio::test]
    async fn test_reset_password_rejects_short() {
        let (_, manager) = setup().await;
        let err = manager.reset_password("u1", "abc").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadRequest);
    }

    #[tokio::test]
    async fn test_reset_password_missing_user() {
        let (_, manager) = setup().await;
        let err = manager.reset_password("ghost", "long-enough").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
