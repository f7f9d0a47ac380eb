//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Roles known to the school application.
///
/// Unknown tags are kept verbatim so that role-config lookups still work
/// for roles introduced without a code change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    /// School administrator.
    Admin,
    /// Teaching staff.
    Teacher,
    /// Enrolled student.
    Student,
    /// Parent or guardian.
    Parent,
    /// Any other role tag.
    Other(String),
}

impl UserRole {
    /// Return the role tag as stored.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::Teacher => "teacher",
            Self::Student => "student",
            Self::Parent => "parent",
            Self::Other(tag) => tag,
        }
    }

    /// Whether this role may write timetables.
    pub fn can_edit_timetable(&self) -> bool {
        matches!(self, Self::Admin | Self::Teacher)
    }
}

impl From<String> for UserRole {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "admin" => Self::Admin,
            "teacher" => Self::Teacher,
            "student" => Self::Student,
            "parent" => Self::Parent,
            _ => Self::Other(tag),
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
