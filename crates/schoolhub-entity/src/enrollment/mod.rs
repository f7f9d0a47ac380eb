//! Enrollment references and the enrolled-subject view.

pub mod reference;
pub mod subject;

pub use reference::SubjectRef;
pub use subject::{EnrolledSubject, ParentClass};
