//! Plaintext-equivalent stored credentials.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use schoolhub_core::result::AppResult;

use super::CredentialVerifier;

/// Stored value is the password itself.
///
/// Both sides are hashed to fixed-length digests before a constant-time
/// comparison, so neither content nor length leaks through timing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextVerifier;

impl CredentialVerifier for PlaintextVerifier {
    fn verify(&self, stored: &str, supplied: &str) -> bool {
        let stored = Sha256::digest(stored.as_bytes());
        let supplied = Sha256::digest(supplied.as_bytes());
        stored.as_slice().ct_eq(supplied.as_slice()).into()
    }

    fn prepare(&self, new_password: &str) -> AppResult<String> {
        Ok(new_password.to_string())
    }
}
