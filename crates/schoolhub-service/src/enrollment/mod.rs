//! Enrolled-subject resolution.

pub mod aggregator;
pub mod resolver;

pub use aggregator::{EnrollmentAggregator, EnrollmentView, EnrollmentWarning};
pub use resolver::derive_parent_path;
