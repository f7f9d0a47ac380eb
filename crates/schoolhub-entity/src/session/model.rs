//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use schoolhub_core::result::AppResult;
use schoolhub_core::types::Document;

/// Collection holding session documents, keyed by token.
pub const SESSIONS_COLLECTION: &str = "sessions";

/// One login lifetime bound to a bearer token.
///
/// Sessions are created on login and flipped inactive on logout, expiry
/// detection, or a newer login by the same user. They are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token; also the document id.
    #[serde(default)]
    pub token: String,
    /// The user this session belongs to.
    pub user_id: String,
    /// Login time, resolved by the store.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Absolute expiry. Sessions without one never expire by time.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether the session may still authenticate requests.
    #[serde(default)]
    pub active: bool,
    /// When the session was flipped inactive.
    #[serde(default)]
    pub deactivated_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Decodes a session from its stored document.
    pub fn from_document(doc: &Document) -> AppResult<Self> {
        let mut session: Session = doc.decode()?;
        if session.token.is_empty() {
            session.token = doc.id.clone();
        }
        Ok(session)
    }

    /// Whether the session has an expiry that lies before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now > expires_at)
    }
}

/// Returns the first eight characters of a token for logging.
pub fn token_hint(token: &str) -> &str {
    let end = token
        .char_indices()
        .nth(8)
        .map(|(i, _)| i)
        .unwrap_or(token.len());
    &token[..end]
}
