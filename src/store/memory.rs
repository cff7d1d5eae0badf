//! In-memory data store backed by a JSON dataset.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::DataStore;
use crate::error::{StoreError, StoreResult};
use crate::models::{
    Batch, Classroom, Faculty, Subject, SubjectWithFaculty, TimetableEntry,
};
use crate::validation::validate_dataset;

/// All timetabling entities, as exchanged in JSON.
///
/// ```json
/// {
///   "batches":    [{"id": "B1", "department": "CS", "semester": 5, "studentCount": 40}],
///   "subjects":   [{"id": "S1", "name": "Algorithms", "type": "LECTURE", "weeklyHours": 3, "facultyId": "F1"}],
///   "faculty":    [{"id": "F1", "department": "CS", "availability": {"monday": ["09:00-17:00"]}}],
///   "classrooms": [{"id": "R1", "name": "A-101", "capacity": 60, "type": "LECTURE_HALL"}],
///   "timetableEntries": []
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub batches: Vec<Batch>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub faculty: Vec<Faculty>,
    #[serde(default)]
    pub classrooms: Vec<Classroom>,
    #[serde(default, alias = "entries")]
    pub timetable_entries: Vec<TimetableEntry>,
}

/// A [`DataStore`] holding a validated [`Dataset`] in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    dataset: Dataset,
}

impl MemoryStore {
    /// Creates a store after checking dataset integrity.
    pub fn from_dataset(dataset: Dataset) -> StoreResult<Self> {
        validate_dataset(
            &dataset.batches,
            &dataset.subjects,
            &dataset.faculty,
            &dataset.classrooms,
        )
        .map_err(StoreError::InvalidDataset)?;
        debug!(
            batches = dataset.batches.len(),
            subjects = dataset.subjects.len(),
            faculty = dataset.faculty.len(),
            classrooms = dataset.classrooms.len(),
            entries = dataset.timetable_entries.len(),
            "memory store loaded"
        );
        Ok(Self { dataset })
    }

    /// Parses and validates a JSON dataset.
    pub fn from_json_str(json: &str) -> StoreResult<Self> {
        let dataset: Dataset = serde_json::from_str(json)?;
        Self::from_dataset(dataset)
    }

    /// Reads, parses and validates a JSON dataset file.
    pub fn from_json_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// The underlying dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// All stored timetable entries.
    pub fn entries(&self) -> &[TimetableEntry] {
        &self.dataset.timetable_entries
    }

    /// Persists entries (e.g., an approved generation result).
    pub fn insert_entries(&mut self, entries: impl IntoIterator<Item = TimetableEntry>) {
        self.dataset.timetable_entries.extend(entries);
    }

    fn faculty_by_id(&self, id: &str) -> Option<&Faculty> {
        self.dataset.faculty.iter().find(|f| f.id == id)
    }
}

impl DataStore for MemoryStore {
    fn find_batches_by_ids(&self, ids: &[String]) -> StoreResult<Vec<Batch>> {
        Ok(self
            .dataset
            .batches
            .iter()
            .filter(|b| ids.contains(&b.id))
            .cloned()
            .collect())
    }

    fn find_all_subjects_with_faculty(&self) -> StoreResult<Vec<SubjectWithFaculty>> {
        Ok(self
            .dataset
            .subjects
            .iter()
            .map(|s| SubjectWithFaculty::new(s.clone(), self.faculty_by_id(&s.faculty_id).cloned()))
            .collect())
    }

    fn find_faculty_by_ids(&self, ids: &[String]) -> StoreResult<Vec<Faculty>> {
        Ok(self
            .dataset
            .faculty
            .iter()
            .filter(|f| ids.contains(&f.id))
            .cloned()
            .collect())
    }

    fn find_classrooms_ordered_by_capacity_desc(&self) -> StoreResult<Vec<Classroom>> {
        let mut rooms = self.dataset.classrooms.clone();
        rooms.sort_by(|a, b| b.capacity.cmp(&a.capacity));
        Ok(rooms)
    }

    fn find_timetable_entries_for_batches(
        &self,
        ids: &[String],
    ) -> StoreResult<Vec<TimetableEntry>> {
        Ok(self
            .dataset
            .timetable_entries
            .iter()
            .filter(|e| ids.contains(&e.batch_id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Day;

    const SAMPLE: &str = r#"{
        "batches": [
            {"id": "B1", "department": "CS", "semester": 5, "studentCount": 40},
            {"id": "B2", "department": "Math", "semester": 3, "studentCount": 25}
        ],
        "subjects": [
            {"id": "S1", "name": "Algorithms", "type": "LECTURE",
             "weeklyHours": 3, "facultyId": "F1"},
            {"id": "S2", "name": "Calculus", "type": "LECTURE",
             "weeklyHours": 2, "facultyId": "F2"}
        ],
        "faculty": [
            {"id": "F1", "name": "Dr. Ada", "department": "CS",
             "availability": {"monday": ["09:00-17:00"]}},
            {"id": "F2", "department": "Math"}
        ],
        "classrooms": [
            {"id": "R1", "name": "Small", "capacity": 30, "type": "LECTURE_HALL"},
            {"id": "R2", "name": "Big", "capacity": 120, "type": "LECTURE_HALL"},
            {"id": "R3", "name": "Lab", "capacity": 30, "type": "LAB"}
        ],
        "timetableEntries": [
            {"id": "E1", "batchId": "B1", "subjectId": "S1", "facultyId": "F1",
             "roomId": "R2", "day": "MONDAY", "timeSlot": "09:00-10:00"}
        ]
    }"#;

    #[test]
    fn test_load_from_json() {
        let store = MemoryStore::from_json_str(SAMPLE).unwrap();
        assert_eq!(store.dataset().batches.len(), 2);
        assert_eq!(store.entries().len(), 1);
        assert_eq!(store.entries()[0].day, Day::Monday);
    }

    #[test]
    fn test_invalid_dataset_rejected() {
        let json = r#"{"subjects": [
            {"id": "S1", "name": "X", "type": "LAB", "weeklyHours": 2, "facultyId": "nobody"}
        ]}"#;
        let err = MemoryStore::from_json_str(json).unwrap_err();
        assert!(matches!(err, StoreError::InvalidDataset(ref e) if e.len() == 1));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = MemoryStore::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
    }

    #[test]
    fn test_find_batches_by_ids() {
        let store = MemoryStore::from_json_str(SAMPLE).unwrap();
        let found = store
            .find_batches_by_ids(&["B2".to_string(), "B9".to_string()])
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "B2");
    }

    #[test]
    fn test_subjects_carry_faculty() {
        let store = MemoryStore::from_json_str(SAMPLE).unwrap();
        let subjects = store.find_all_subjects_with_faculty().unwrap();
        assert_eq!(subjects.len(), 2);
        assert_eq!(subjects[0].faculty.as_ref().unwrap().name, "Dr. Ada");
        assert_eq!(subjects[1].faculty.as_ref().unwrap().department, "Math");
    }

    #[test]
    fn test_classrooms_by_capacity_desc_stable() {
        let store = MemoryStore::from_json_str(SAMPLE).unwrap();
        let ids: Vec<String> = store
            .find_classrooms_ordered_by_capacity_desc()
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        // R1 and R3 tie on capacity: listing order kept
        assert_eq!(ids, vec!["R2", "R1", "R3"]);
    }

    #[test]
    fn test_entries_for_batches_and_insert() {
        let mut store = MemoryStore::from_json_str(SAMPLE).unwrap();
        assert_eq!(
            store
                .find_timetable_entries_for_batches(&["B2".to_string()])
                .unwrap()
                .len(),
            0
        );
        let extra = store.entries()[0].clone();
        store.insert_entries([TimetableEntry { id: "E2".into(), batch_id: "B2".into(), ..extra }]);
        assert_eq!(
            store
                .find_timetable_entries_for_batches(&["B2".to_string()])
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.json");
        std::fs::write(&path, SAMPLE).unwrap();
        let store = MemoryStore::from_json_file(&path).unwrap();
        assert_eq!(store.dataset().classrooms.len(), 3);

        let missing = MemoryStore::from_json_file(dir.path().join("nope.json"));
        let missing = missing.unwrap_err();
        assert!(matches!(missing, StoreError::Io(_)));
    }
}
