//! Session domain entities.

pub mod model;

pub use model::{SESSIONS_COLLECTION, Session};
