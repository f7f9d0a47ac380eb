//! Parent path derivation for subject references.
//!
//! A subject lives at `.../classes/{class_id}/subjects/{subject_id}`; its
//! class is the document two segments up.

use schoolhub_core::types::path::{SEPARATOR, segments};
use schoolhub_entity::enrollment::SubjectRef;

const SUBJECTS_SEGMENT: &str = "subjects";
const MIN_SEGMENTS: usize = 5;

/// Returns the absolute path of the class containing the referenced
/// subject, or `None` when the reference does not have a subject shape.
///
/// A path string must be absolute; a reference handle may omit the
/// leading separator.
pub fn derive_parent_path(reference: &SubjectRef) -> Option<String> {
    if let SubjectRef::PathString(path) = reference {
        if !path.starts_with(SEPARATOR) {
            return None;
        }
    }

    let parts = segments(reference.raw_path());
    let n = parts.len();
    if n < MIN_SEGMENTS || parts[n - 2] != SUBJECTS_SEGMENT {
        return None;
    }

    Some(format!("{SEPARATOR}{}", parts[..n - 2].join("/")))
}
