//! Subject records annotated with their parent class.

use serde::Serialize;

use schoolhub_core::types::{Document, Fields};

const RESERVED_KEYS: [&str; 3] = ["id", "refPath", "parentClass"];

/// The class that structurally contains a subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParentClass {
    /// Class document id.
    pub id: String,
    /// Class fields.
    #[serde(flatten)]
    pub fields: Fields,
}

/// A subject the user is enrolled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrolledSubject {
    /// Subject document id.
    pub id: String,
    /// Absolute path of the subject document.
    #[serde(rename = "refPath")]
    pub ref_path: String,
    /// Subject fields.
    #[serde(flatten)]
    pub fields: Fields,
    /// The parent class, or `null` when its document is missing.
    #[serde(rename = "parentClass")]
    pub parent_class: Option<ParentClass>,
}

impl EnrolledSubject {
    /// Builds the view from a subject document and its optional parent.
    pub fn new(subject: Document, parent: Option<Document>) -> Self {
        let ref_path = subject.path();
        Self {
            id: subject.id,
            ref_path,
            fields: strip_reserved(subject.fields),
            parent_class: parent.map(|doc| ParentClass {
                id: doc.id,
                fields: strip_reserved(doc.fields),
            }),
        }
    }
}

fn strip_reserved(mut fields: Fields) -> Fields {
    for key in RESERVED_KEYS {
        fields.remove(key);
    }
    fields
}
