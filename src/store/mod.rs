//! Data store and curriculum collaborators.
//!
//! The generator reads everything it needs through [`DataStore`] and
//! never writes: persisting generated entries is the caller's job.
//! [`CurriculumResolver`] decides which subjects a batch takes.
//!
//! [`MemoryStore`] is an in-memory implementation backed by a JSON
//! [`Dataset`], used by the CLI and the tests.

mod memory;

use std::sync::Arc;

pub use memory::{Dataset, MemoryStore};

use crate::error::StoreResult;
use crate::models::{Batch, Classroom, Faculty, SubjectWithFaculty, TimetableEntry};

/// Read-only access to timetabling entities.
pub trait DataStore {
    /// Batches whose id is in `ids`. Missing ids are simply absent.
    fn find_batches_by_ids(&self, ids: &[String]) -> StoreResult<Vec<Batch>>;

    /// Every subject, each with its resolved faculty record, in load order.
    fn find_all_subjects_with_faculty(&self) -> StoreResult<Vec<SubjectWithFaculty>>;

    /// Faculty whose id is in `ids`.
    fn find_faculty_by_ids(&self, ids: &[String]) -> StoreResult<Vec<Faculty>>;

    /// All classrooms, largest capacity first.
    fn find_classrooms_ordered_by_capacity_desc(&self) -> StoreResult<Vec<Classroom>>;

    /// Existing entries belonging to any of the given batches.
    fn find_timetable_entries_for_batches(
        &self,
        ids: &[String],
    ) -> StoreResult<Vec<TimetableEntry>>;
}

impl<T: DataStore + ?Sized> DataStore for &T {
    fn find_batches_by_ids(&self, ids: &[String]) -> StoreResult<Vec<Batch>> {
        (**self).find_batches_by_ids(ids)
    }

    fn find_all_subjects_with_faculty(&self) -> StoreResult<Vec<SubjectWithFaculty>> {
        (**self).find_all_subjects_with_faculty()
    }

    fn find_faculty_by_ids(&self, ids: &[String]) -> StoreResult<Vec<Faculty>> {
        (**self).find_faculty_by_ids(ids)
    }

    fn find_classrooms_ordered_by_capacity_desc(&self) -> StoreResult<Vec<Classroom>> {
        (**self).find_classrooms_ordered_by_capacity_desc()
    }

    fn find_timetable_entries_for_batches(
        &self,
        ids: &[String],
    ) -> StoreResult<Vec<TimetableEntry>> {
        (**self).find_timetable_entries_for_batches(ids)
    }
}

impl<T: DataStore + ?Sized> DataStore for Arc<T> {
    fn find_batches_by_ids(&self, ids: &[String]) -> StoreResult<Vec<Batch>> {
        (**self).find_batches_by_ids(ids)
    }

    fn find_all_subjects_with_faculty(&self) -> StoreResult<Vec<SubjectWithFaculty>> {
        (**self).find_all_subjects_with_faculty()
    }

    fn find_faculty_by_ids(&self, ids: &[String]) -> StoreResult<Vec<Faculty>> {
        (**self).find_faculty_by_ids(ids)
    }

    fn find_classrooms_ordered_by_capacity_desc(&self) -> StoreResult<Vec<Classroom>> {
        (**self).find_classrooms_ordered_by_capacity_desc()
    }

    fn find_timetable_entries_for_batches(
        &self,
        ids: &[String],
    ) -> StoreResult<Vec<TimetableEntry>> {
        (**self).find_timetable_entries_for_batches(ids)
    }
}

/// Decides which subjects a batch must take.
pub trait CurriculumResolver {
    /// Subjects for `batch`, in the order they should be scheduled.
    fn subjects_for_batch<'a>(
        &self,
        batch: &Batch,
        subjects: &'a [SubjectWithFaculty],
    ) -> Vec<&'a SubjectWithFaculty>;
}

/// Assigns a subject to every batch of its faculty's department.
///
/// Subjects without a resolved faculty match no batch. Load order is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepartmentCurriculum;

impl CurriculumResolver for DepartmentCurriculum {
    fn subjects_for_batch<'a>(
        &self,
        batch: &Batch,
        subjects: &'a [SubjectWithFaculty],
    ) -> Vec<&'a SubjectWithFaculty> {
        subjects
            .iter()
            .filter(|s| {
                s.faculty
                    .as_ref()
                    .is_some_and(|f| f.department == batch.department)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Subject, SubjectType};

    fn with_faculty(id: &str, dept: &str) -> SubjectWithFaculty {
        SubjectWithFaculty::new(
            Subject::new(id, id, SubjectType::Lecture, 2, format!("F-{dept}")),
            Some(Faculty::new(format!("F-{dept}"), dept)),
        )
    }

    #[test]
    fn test_department_curriculum_filters_and_keeps_order() {
        let subjects = vec![
            with_faculty("S1", "CS"),
            with_faculty("S2", "Math"),
            with_faculty("S3", "CS"),
            SubjectWithFaculty::new(
                Subject::new("S4", "Orphan", SubjectType::Lecture, 1, "F404"),
                None,
            ),
        ];
        let batch = Batch::new("B1", "CS", 3, 30);
        let picked: Vec<&str> = DepartmentCurriculum
            .subjects_for_batch(&batch, &subjects)
            .iter()
            .map(|s| s.subject.id.as_str())
            .collect();
        assert_eq!(picked, vec!["S1", "S3"]);
    }

    #[test]
    fn test_department_curriculum_no_match() {
        let subjects = vec![with_faculty("S1", "CS")];
        let batch = Batch::new("B1", "Physics", 1, 30);
        assert!(DepartmentCurriculum
            .subjects_for_batch(&batch, &subjects)
            .is_empty());
    }
}
