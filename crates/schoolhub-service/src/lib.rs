//! # schoolhub-service
//!
//! Business logic service layer for SchoolHub. Services receive their
//! repositories and managers at construction time via `Arc` references.

pub mod context;
pub mod enrollment;
pub mod role_config;
pub mod timetable;
pub mod user;

pub use context::RequestContext;
pub use enrollment::{EnrollmentAggregator, EnrollmentView, EnrollmentWarning};
pub use role_config::RoleConfigService;
pub use timetable::TimetableService;
pub use user::UserService;
