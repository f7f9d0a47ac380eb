//! Builds a user's enrolled-subjects view.
//!
//! Individual references that cannot be resolved are reported as warnings;
//! only a missing user fails the whole call.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use schoolhub_core::error::AppError;
use schoolhub_core::result::AppResult;
use schoolhub_core::traits::DocumentStore;
use schoolhub_core::types::DocumentPath;
use schoolhub_database::repositories::UserRepository;
use schoolhub_entity::enrollment::{EnrolledSubject, SubjectRef};
use schoolhub_entity::user::User;

use super::resolver::derive_parent_path;

/// Why an enrollment reference was skipped or degraded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollmentWarning {
    /// The stored reference is neither a path string nor a reference object.
    UnsupportedReference {
        /// Position in the enrollment list.
        index: usize,
    },
    /// The reference does not point at a subject inside a class.
    NotASubjectPath {
        /// Position in the enrollment list.
        index: usize,
        /// The offending path.
        path: String,
    },
    /// The referenced subject document does not exist.
    MissingSubject {
        /// Path of the subject.
        path: String,
    },
    /// The subject exists but its class document does not.
    MissingParent {
        /// Path of the subject.
        path: String,
        /// Path of the missing class.
        parent: String,
    },
}

impl fmt::Display for EnrollmentWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedReference { index } => {
                write!(f, "enrollment #{index} has an unsupported shape")
            }
            Self::NotASubjectPath { index, path } => {
                write!(f, "enrollment #{index} ('{path}') is not a subject path")
            }
            Self::MissingSubject { path } => write!(f, "subject '{path}' does not exist"),
            Self::MissingParent { path, parent } => {
                write!(f, "class '{parent}' of subject '{path}' does not exist")
            }
        }
    }
}

/// The enrolled subjects of a user, in enrollment order.
#[derive(Debug, Clone, Default)]
pub struct EnrollmentView {
    /// Resolved subjects.
    pub subjects: Vec<EnrolledSubject>,
    /// References that were skipped or resolved without a class.
    pub warnings: Vec<EnrollmentWarning>,
}

struct Pending {
    subject: DocumentPath,
    parent: DocumentPath,
}

/// Resolves enrollment references into subjects annotated with their class.
#[derive(Debug, Clone)]
pub struct EnrollmentAggregator {
    user_repo: Arc<UserRepository>,
    store: Arc<dyn DocumentStore>,
}

impl EnrollmentAggregator {
    /// Creates a new aggregator.
    pub fn new(user_repo: Arc<UserRepository>, store: Arc<dyn DocumentStore>) -> Self {
        Self { user_repo, store }
    }

    /// Loads the user and resolves its enrollments.
    pub async fn enrolled_subjects(&self, user_id: &str) -> AppResult<EnrollmentView> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        self.resolve(&user).await
    }

    /// Resolves the enrollments of an already loaded user.
    ///
    /// Every subject and class read goes out in a single `get_all` call;
    /// results are paired back up by position.
    pub async fn resolve(&self, user: &User) -> AppResult<EnrollmentView> {
        let mut view = EnrollmentView::default();
        let pending = collect_pending(user.enrollment_refs(), &mut view.warnings);

        if !pending.is_empty() {
            let mut paths: Vec<DocumentPath> = pending.iter().map(|p| p.subject.clone()).collect();
            paths.extend(pending.iter().map(|p| p.parent.clone()));

            let mut docs = self.store.get_all(&paths).await?;
            let parents = docs.split_off(pending.len());

            for ((item, subject), parent) in pending.iter().zip(docs).zip(parents) {
                let Some(subject) = subject else {
                    view.warnings.push(EnrollmentWarning::MissingSubject {
                        path: item.subject.to_string(),
                    });
                    continue;
                };
                if parent.is_none() {
                    view.warnings.push(EnrollmentWarning::MissingParent {
                        path: item.subject.to_string(),
                        parent: item.parent.to_string(),
                    });
                }
                view.subjects.push(EnrolledSubject::new(subject, parent));
            }
        }

        for warning in &view.warnings {
            warn!(user_id = %user.id, "Enrollment skipped or degraded: {warning}");
        }
        debug!(
            user_id = %user.id,
            subjects = view.subjects.len(),
            warnings = view.warnings.len(),
            "Enrollments resolved"
        );

        Ok(view)
    }
}

fn collect_pending(refs: &[Value], warnings: &mut Vec<EnrollmentWarning>) -> Vec<Pending> {
    let mut pending = Vec::with_capacity(refs.len());

    for (index, value) in refs.iter().enumerate() {
        let Some(reference) = SubjectRef::from_value(value) else {
            warnings.push(EnrollmentWarning::UnsupportedReference { index });
            continue;
        };

        let resolved = derive_parent_path(&reference).and_then(|parent| {
            let subject = DocumentPath::parse(reference.raw_path()).ok()?;
            let parent = DocumentPath::parse(&parent).ok()?;
            Some(Pending { subject, parent })
        });

        match resolved {
            Some(item) => pending.push(item),
            None => warnings.push(EnrollmentWarning::NotASubjectPath {
                index,
                path: reference.raw_path().to_string(),
            }),
        }
    }

    pending
}
