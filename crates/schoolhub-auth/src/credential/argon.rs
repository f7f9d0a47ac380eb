//! Argon2id hashed credentials.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use tracing::warn;
use uuid::Uuid;

use schoolhub_core::error::AppError;
use schoolhub_core::result::AppResult;

use super::CredentialVerifier;

/// Stored value is a PHC-format Argon2id hash.
#[derive(Debug, Clone, Default)]
pub struct Argon2Verifier {
    argon2: Argon2<'static>,
}

impl Argon2Verifier {
    /// Creates a verifier with default Argon2id parameters.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialVerifier for Argon2Verifier {
    fn verify(&self, stored: &str, supplied: &str) -> bool {
        let parsed = match PasswordHash::new(stored) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "Stored credential is not a valid Argon2 hash");
                return false;
            }
        };
        self.argon2
            .verify_password(supplied.as_bytes(), &parsed)
            .is_ok()
    }

    fn prepare(&self, new_password: &str) -> AppResult<String> {
        let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes())
            .map_err(|e| AppError::internal(format!("Salt generation failed: {e}")))?;

        let hash = self
            .argon2
            .hash_password(new_password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }
}
