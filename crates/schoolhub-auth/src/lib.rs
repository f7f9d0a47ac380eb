//! # schoolhub-auth
//!
//! Session-based authentication for SchoolHub.
//!
//! ## Modules
//!
//! - `credential`: pluggable stored-credential comparison (plaintext or Argon2id)
//! - `token`: bearer token generation
//! - `session`: session store adapter, login/logout lifecycle, expiry sweeper
//! - `guard`: per-request bearer token validation

pub mod credential;
pub mod guard;
pub mod session;
pub mod token;

pub use credential::{CredentialVerifier, verifier_from_config};
pub use guard::{AuthGuard, AuthenticatedUser};
pub use session::{LoginResult, OpenedSession, SessionCleanup, SessionManager, SessionStore};
