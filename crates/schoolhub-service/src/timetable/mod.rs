//! Class timetables.

pub mod service;

pub use service::TimetableService;
