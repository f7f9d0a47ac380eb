//! User entity model.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use schoolhub_core::result::AppResult;
use schoolhub_core::types::{Document, Fields};

use super::role::UserRole;

/// Collection holding user documents, keyed by user id.
pub const USERS_COLLECTION: &str = "users";

/// Name of the stored credential field.
pub const CREDENTIAL_FIELD: &str = "password";

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Document id. Not stored as a field.
    #[serde(skip)]
    pub id: String,
    /// Login email, matched exactly.
    #[serde(default)]
    pub email: String,
    /// Stored credential, compared through a `CredentialVerifier`.
    #[serde(default, skip_serializing)]
    pub password: String,
    /// Role tag.
    #[serde(default, rename = "user_role")]
    pub role: Option<UserRole>,
    /// Legacy role tag, used only when `user_role` is absent.
    #[serde(default, skip_serializing)]
    user_type: Option<UserRole>,
    /// School the user belongs to.
    #[serde(default)]
    pub school_id: Option<String>,
    /// Raw enrollment reference list. Anything but an array means "none".
    #[serde(default)]
    pub enrolled_subjects: Value,
    /// First-login flag, cleared by password reset.
    #[serde(default)]
    pub is_new: bool,
}

impl User {
    /// Decodes a user from its stored document.
    pub fn from_document(doc: &Document) -> AppResult<Self> {
        let mut user: User = doc.decode()?;
        user.id = doc.id.clone();
        if user.role.is_none() {
            user.role = user.user_type.take();
        }
        Ok(user)
    }

    /// The enrollment references, in stored order.
    pub fn enrollment_refs(&self) -> &[Value] {
        match &self.enrolled_subjects {
            Value::Array(items) => items,
            _ => &[],
        }
    }
}

/// Returns the document fields with the credential removed.
pub fn public_fields(doc: &Document) -> Fields {
    let mut fields = doc.fields.clone();
    fields.remove(CREDENTIAL_FIELD);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        Document::new(USERS_COLLECTION, "u1", value.as_object().cloned().unwrap())
    }

    #[test]
    fn test_decode_with_legacy_role_field() {
        let user = User::from_document(&doc(json!({
            "email": "a@school.test",
            "password": "pw",
            "user_type": "teacher",
            "is_new": true
        })))
        .unwrap();

        assert_eq!(user.id, "u1");
        assert_eq!(user.role, Some(UserRole::Teacher));
        assert!(user.is_new);
        assert!(user.enrollment_refs().is_empty());
    }

    #[test]
    fn test_current_role_field_wins_over_legacy() {
        let user = User::from_document(&doc(json!({
            "email": "a@school.test",
            "user_role": "admin",
            "user_type": "teacher"
        })))
        .unwrap();
        assert_eq!(user.role, Some(UserRole::Admin));

        let out = serde_json::to_value(&user).unwrap();
        assert_eq!(out["user_role"], json!("admin"));
        assert!(out.get("user_type").is_none());
    }

    #[test]
    fn test_non_list_enrollments_are_empty() {
        let user = User::from_document(&doc(json!({
            "email": "a@school.test",
            "enrolled_subjects": "not a list"
        })))
        .unwrap();
        assert!(user.enrollment_refs().is_empty());
    }

    #[test]
    fn test_password_never_serialized() {
        let user = User::from_document(&doc(json!({"email": "a", "password": "secret"}))).unwrap();
        let out = serde_json::to_value(&user).unwrap();
        assert!(out.get("password").is_none());

        let fields = public_fields(&doc(json!({"email": "a", "password": "secret"})));
        assert!(!fields.contains_key("password"));
    }
}
