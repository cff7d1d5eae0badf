//! Subject model.
//!
//! A subject is a course that needs a number of weekly sessions.
//! Session length follows from the subject type:
//!
//! | Type | Hours per session |
//! |------|-------------------|
//! | `LAB` | 2 |
//! | `LECTURE`, `ELECTIVE` | 1 |
//!
//! Required sessions per week = ceil(weekly_hours / hours_per_session).

use serde::{Deserialize, Serialize};

use super::Faculty;

/// Kind of teaching a subject requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubjectType {
    Lecture,
    Lab,
    Elective,
}

/// A course requiring scheduled sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Unique subject identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Lecture, lab or elective.
    #[serde(rename = "type")]
    pub subject_type: SubjectType,
    /// Contact hours per week.
    pub weekly_hours: u32,
    /// The single faculty member teaching this subject.
    pub faculty_id: String,
}

impl Subject {
    /// Creates a new subject.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        subject_type: SubjectType,
        weekly_hours: u32,
        faculty_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            subject_type,
            weekly_hours,
            faculty_id: faculty_id.into(),
        }
    }

    /// Hours per session: 2 for labs, 1 otherwise.
    #[inline]
    pub fn session_length(&self) -> u32 {
        match self.subject_type {
            SubjectType::Lab => 2,
            SubjectType::Lecture | SubjectType::Elective => 1,
        }
    }

    /// Number of weekly sessions needed to cover `weekly_hours`.
    #[inline]
    pub fn required_sessions(&self) -> u32 {
        self.weekly_hours.div_ceil(self.session_length())
    }
}

/// A subject together with its resolved faculty record, as loaded
/// from the data store. `faculty` is `None` when the reference dangles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectWithFaculty {
    #[serde(flatten)]
    pub subject: Subject,
    #[serde(default)]
    pub faculty: Option<Faculty>,
}

impl SubjectWithFaculty {
    pub fn new(subject: Subject, faculty: Option<Faculty>) -> Self {
        Self { subject, faculty }
    }
}
