//! Session lifecycle: persistence, login/logout, and expiry cleanup.

pub mod cleanup;
pub mod manager;
pub mod store;

pub use cleanup::SessionCleanup;
pub use manager::{LoginResult, SessionManager};
pub use store::{OpenedSession, SessionStore};
