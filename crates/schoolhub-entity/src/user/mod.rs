//! User domain entities.

pub mod model;
pub mod role;

pub use model::{USERS_COLLECTION, User};
pub use role::UserRole;
