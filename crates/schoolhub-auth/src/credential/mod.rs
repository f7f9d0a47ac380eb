//! Stored-credential comparison.
//!
//! The lifecycle manager never compares passwords itself; it goes through a
//! [`CredentialVerifier`] chosen by `auth.credential_scheme`.

pub mod argon;
pub mod plaintext;

use std::sync::Arc;

use schoolhub_core::config::{AuthConfig, CredentialScheme};
use schoolhub_core::result::AppResult;

pub use argon::Argon2Verifier;
pub use plaintext::PlaintextVerifier;

/// Compares a supplied password with the stored credential.
pub trait CredentialVerifier: Send + Sync + std::fmt::Debug {
    /// Returns `true` if `supplied` matches `stored`.
    fn verify(&self, stored: &str, supplied: &str) -> bool;

    /// Produces the value to store for a new password.
    fn prepare(&self, new_password: &str) -> AppResult<String>;
}

/// Builds the verifier for the configured scheme.
pub fn verifier_from_config(config: &AuthConfig) -> Arc<dyn CredentialVerifier> {
    match config.credential_scheme {
        CredentialScheme::Plaintext => Arc::new(PlaintextVerifier),
        CredentialScheme::Argon2 => Arc::new(Argon2Verifier::new()),
    }
}
