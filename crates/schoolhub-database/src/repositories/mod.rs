//! Repositories over the document store.

pub mod role_config;
pub mod session;
pub mod timetable;
pub mod user;

pub use role_config::RoleConfigRepository;
pub use session::SessionRepository;
pub use timetable::TimetableRepository;
pub use user::UserRepository;
