//! Credential configuration.

use serde::{Deserialize, Serialize};

/// How stored credentials are compared against supplied passwords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialScheme {
    /// The stored value is the password itself. Compared in constant time.
    #[default]
    Plaintext,
    /// The stored value is an Argon2 PHC hash string.
    Argon2,
}

impl std::fmt::Display for CredentialScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plaintext => write!(f, "plaintext"),
            Self::Argon2 => write!(f, "argon2"),
        }
    }
}

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Credential comparison scheme.
    #[serde(default)]
    pub credential_scheme: CredentialScheme,
    /// Minimum length accepted by password reset.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            credential_scheme: CredentialScheme::default(),
            password_min_length: default_password_min(),
        }
    }
}

fn default_password_min() -> usize {
    6
}
