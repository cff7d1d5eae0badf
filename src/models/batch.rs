//! Student batch model.

use serde::{Deserialize, Serialize};

/// A cohort of students sharing a department and semester.
///
/// The (department, semester) pair is unique among batches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    /// Unique batch identifier.
    pub id: String,
    /// Owning department (e.g., "Computer Science").
    pub department: String,
    /// Semester number (1-based).
    pub semester: u32,
    /// Number of enrolled students; rooms must seat at least this many.
    pub student_count: u32,
}

impl Batch {
    /// Creates a new batch.
    pub fn new(
        id: impl Into<String>,
        department: impl Into<String>,
        semester: u32,
        student_count: u32,
    ) -> Self {
        Self {
            id: id.into(),
            department: department.into(),
            semester,
            student_count,
        }
    }

    /// Human-readable label: `"<department> <semester>"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.department, self.semester)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_label() {
        let b = Batch::new("B1", "CS", 5, 40);
        assert_eq!(b.label(), "CS 5");
        assert_eq!(b.student_count, 40);
    }

    #[test]
    fn test_batch_serde_camel_case() {
        let b = Batch::new("B1", "CS", 5, 40);
        let json = serde_json::to_value(&b).unwrap();
        assert_eq!(json["studentCount"], 40);
        assert_eq!(json["semester"], 5);
    }
}
