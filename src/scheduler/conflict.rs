//! Conflict detection.
//!
//! Three entry points share one notion of a collision: two entries with
//! the same owner (batch, faculty or room) on the same day and time-slot.
//!
//! - [`detect_conflicts`] tests a candidate placement against the working
//!   set during generation.
//! - [`check_conflicts`] answers an ad-hoc query against a list of entries
//!   (used when creating or editing entries by hand).
//! - [`audit`] lists every double-booking within a list of entries.

use std::collections::BTreeMap;

use crate::models::{
    Batch, Classroom, Conflict, ConflictKind, Day, Faculty, TimeSlot, TimetableEntry,
};

use super::WorkingSet;

/// Collisions of a candidate (batch, faculty, room?) at (day, slot).
///
/// Every dimension is checked; the result lists one conflict per colliding
/// dimension with all colliding entry ids. An empty result means the
/// placement is free for the given owners.
pub fn detect_conflicts(
    batch: &Batch,
    faculty: &Faculty,
    room: Option<&Classroom>,
    day: Day,
    slot: TimeSlot,
    working: &WorkingSet,
) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    let hits = working.batch_entries_at(&batch.id, day, slot);
    if !hits.is_empty() {
        conflicts.push(Conflict::batch(
            format!(
                "Batch {} {} already has a class at {day} {slot}",
                batch.department, batch.semester
            ),
            ids(&hits),
        ));
    }

    let hits = working.faculty_entries_at(&faculty.id, day, slot);
    if !hits.is_empty() {
        conflicts.push(Conflict::faculty(
            format!(
                "Faculty {} already has a class at {day} {slot}",
                faculty.display_name()
            ),
            ids(&hits),
        ));
    }

    if let Some(room) = room {
        let hits = working.room_entries_at(&room.id, day, slot);
        if !hits.is_empty() {
            conflicts.push(Conflict::room(
                format!("Room {} already occupied at {day} {slot}", room.name),
                ids(&hits),
            ));
        }
    }

    conflicts
}

/// An ad-hoc "would this placement collide?" query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictQuery {
    pub batch_id: Option<String>,
    pub faculty_id: Option<String>,
    pub room_id: Option<String>,
    pub day: Day,
    pub time_slot: TimeSlot,
    /// Entry to ignore, e.g. the one being edited.
    pub exclude_entry_id: Option<String>,
}

impl ConflictQuery {
    /// Query for (day, slot) with no owners set.
    pub fn new(day: Day, time_slot: TimeSlot) -> Self {
        Self {
            batch_id: None,
            faculty_id: None,
            room_id: None,
            day,
            time_slot,
            exclude_entry_id: None,
        }
    }

    pub fn with_batch(mut self, batch_id: impl Into<String>) -> Self {
        self.batch_id = Some(batch_id.into());
        self
    }

    pub fn with_faculty(mut self, faculty_id: impl Into<String>) -> Self {
        self.faculty_id = Some(faculty_id.into());
        self
    }

    pub fn with_room(mut self, room_id: impl Into<String>) -> Self {
        self.room_id = Some(room_id.into());
        self
    }

    /// Ignores the entry with this id.
    pub fn excluding(mut self, entry_id: impl Into<String>) -> Self {
        self.exclude_entry_id = Some(entry_id.into());
        self
    }
}

/// Answers a [`ConflictQuery`] against `entries`.
///
/// Reports at most one conflict per dimension, in batch, faculty, room
/// order. Owners left unset in the query are not checked.
pub fn check_conflicts(query: &ConflictQuery, entries: &[TimetableEntry]) -> Vec<Conflict> {
    let candidates: Vec<&TimetableEntry> = entries
        .iter()
        .filter(|e| e.occupies(query.day, query.time_slot))
        .filter(|e| query.exclude_entry_id.as_deref() != Some(e.id.as_str()))
        .collect();

    let dimensions: [(ConflictKind, Option<&str>, &str); 3] = [
        (
            ConflictKind::Batch,
            query.batch_id.as_deref(),
            "Batch already has a class at this time",
        ),
        (
            ConflictKind::Faculty,
            query.faculty_id.as_deref(),
            "Faculty already has a class at this time",
        ),
        (ConflictKind::Room, query.room_id.as_deref(), "Room already occupied at this time"),
    ];

    let mut conflicts = Vec::new();
    for (kind, owner, message) in dimensions {
        let Some(owner) = owner else { continue };
        let hits: Vec<&TimetableEntry> = candidates
            .iter()
            .copied()
            .filter(|e| owner_of(e, kind) == owner)
            .collect();
        if !hits.is_empty() {
            conflicts.push(Conflict::new(kind, message, ids(&hits)));
        }
    }
    conflicts
}

/// Lists every double-booking among `entries`.
///
/// Conflicts come out grouped by dimension (batch, faculty, room), then
/// ordered by owner id, day and slot.
pub fn audit(entries: &[TimetableEntry]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    for kind in [ConflictKind::Batch, ConflictKind::Faculty, ConflictKind::Room] {
        let mut groups: BTreeMap<(&str, Day, TimeSlot), Vec<&TimetableEntry>> = BTreeMap::new();
        for entry in entries {
            groups
                .entry((owner_of(entry, kind), entry.day, entry.time_slot))
                .or_default()
                .push(entry);
        }
        for ((owner, day, slot), hits) in groups {
            if hits.len() < 2 {
                continue;
            }
            let n = hits.len();
            let message = match kind {
                ConflictKind::Batch => format!("Batch {owner} has {n} classes at {day} {slot}"),
                ConflictKind::Faculty => format!("Faculty {owner} has {n} classes at {day} {slot}"),
                ConflictKind::Room => format!("Room {owner} is booked {n} times at {day} {slot}"),
            };
            conflicts.push(Conflict::new(kind, message, ids(&hits)));
        }
    }
    conflicts
}

fn owner_of(entry: &TimetableEntry, kind: ConflictKind) -> &str {
    match kind {
        ConflictKind::Batch => &entry.batch_id,
        ConflictKind::Faculty => &entry.faculty_id,
        ConflictKind::Room => &entry.room_id,
    }
}

fn ids(entries: &[&TimetableEntry]) -> Vec<String> {
    entries.iter().map(|e| e.id.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(s: &str) -> TimeSlot {
        s.parse().unwrap()
    }

    fn entry(
        id: &str,
        batch: &str,
        faculty: &str,
        room: &str,
        day: Day,
        at: &str,
    ) -> TimetableEntry {
        TimetableEntry::new(id, batch, "S1", faculty, room, day, slot(at))
    }

    fn detect(
        batch: &Batch,
        faculty: &Faculty,
        room: Option<&Classroom>,
        day: Day,
        at: &str,
    ) -> Vec<Conflict> {
        detect_conflicts(batch, faculty, room, day, slot(at), &working())
    }

    fn working() -> WorkingSet {
        WorkingSet::seeded(vec![
            entry("E1", "B1", "F1", "R1", Day::Monday, "09:00-10:00"),
            entry("E2", "B2", "F2", "R2", Day::Monday, "10:00-11:00"),
        ])
    }

    #[test]
    fn test_no_conflict_on_free_slot() {
        let batch = Batch::new("B1", "CS", 5, 40);
        let faculty = Faculty::new("F1", "CS");
        let conflicts = detect(&batch, &faculty, None, Day::Tuesday, "09:00-10:00");
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_batch_and_faculty_both_reported() {
        let batch = Batch::new("B1", "CS", 5, 40);
        let faculty = Faculty::new("F1", "CS").with_name("Dr. Ada");
        let conflicts = detect(&batch, &faculty, None, Day::Monday, "09:00-10:00");
        assert_eq!(conflicts.len(), 2);
        assert_eq!(conflicts[0].kind, ConflictKind::Batch);
        assert_eq!(conflicts[0].message, "Batch CS 5 already has a class at MONDAY 09:00-10:00");
        assert_eq!(conflicts[0].entries, vec!["E1"]);
        assert_eq!(conflicts[1].kind, ConflictKind::Faculty);
        assert_eq!(
            conflicts[1].message,
            "Faculty Dr. Ada already has a class at MONDAY 09:00-10:00"
        );
    }

    #[test]
    fn test_faculty_only() {
        let batch = Batch::new("B3", "Math", 1, 20);
        let faculty = Faculty::new("F2", "Math");
        let conflicts = detect(&batch, &faculty, None, Day::Monday, "10:00-11:00");
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::Faculty);
        // unnamed faculty falls back to id
        assert!(conflicts[0].message.starts_with("Faculty F2 "));
    }

    #[test]
    fn test_room_checked_when_given() {
        let batch = Batch::new("B3", "Math", 1, 20);
        let faculty = Faculty::new("F3", "Math");
        let room = Classroom::hall("R1", "A-101", 60);
        let conflicts = detect(&batch, &faculty, Some(&room), Day::Monday, "09:00-10:00");
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::Room);
        assert_eq!(conflicts[0].message, "Room A-101 already occupied at MONDAY 09:00-10:00");
    }

    #[test]
    fn test_exact_slot_match_only() {
        let batch = Batch::new("B1", "CS", 5, 40);
        let faculty = Faculty::new("F1", "CS");
        let conflicts = detect(&batch, &faculty, None, Day::Monday, "09:30-10:30");
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_check_conflicts_query() {
        let entries = vec![
            entry("E1", "B1", "F1", "R1", Day::Monday, "09:00-10:00"),
            entry("E2", "B2", "F1", "R2", Day::Monday, "09:00-10:00"),
        ];
        let query = ConflictQuery::new(Day::Monday, slot("09:00-10:00"))
            .with_batch("B1")
            .with_faculty("F1")
            .with_room("R3");
        let conflicts = check_conflicts(&query, &entries);
        assert_eq!(conflicts.len(), 2);
        assert_eq!(conflicts[0].message, "Batch already has a class at this time");
        assert_eq!(conflicts[1].kind, ConflictKind::Faculty);
        assert_eq!(conflicts[1].entries, vec!["E1", "E2"]);
    }

    #[test]
    fn test_check_conflicts_excludes_entry() {
        let entries = vec![entry("E1", "B1", "F1", "R1", Day::Monday, "09:00-10:00")];
        let query = ConflictQuery::new(Day::Monday, slot("09:00-10:00"))
            .with_batch("B1")
            .with_room("R1")
            .excluding("E1");
        assert!(check_conflicts(&query, &entries).is_empty());

        let query = ConflictQuery::new(Day::Monday, slot("09:00-10:00")).with_room("R1");
        let conflicts = check_conflicts(&query, &entries);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].message, "Room already occupied at this time");
    }

    #[test]
    fn test_check_conflicts_without_owners() {
        let entries = vec![entry("E1", "B1", "F1", "R1", Day::Monday, "09:00-10:00")];
        let query = ConflictQuery::new(Day::Monday, slot("09:00-10:00"));
        assert!(check_conflicts(&query, &entries).is_empty());
    }

    #[test]
    fn test_audit_clean() {
        let entries = vec![
            entry("E1", "B1", "F1", "R1", Day::Monday, "09:00-10:00"),
            entry("E2", "B1", "F1", "R1", Day::Monday, "10:00-11:00"),
            entry("E3", "B2", "F2", "R2", Day::Monday, "09:00-10:00"),
        ];
        assert!(audit(&entries).is_empty());
    }

    #[test]
    fn test_audit_reports_each_dimension() {
        let entries = vec![
            entry("E1", "B1", "F1", "R1", Day::Monday, "09:00-10:00"),
            entry("E2", "B1", "F2", "R1", Day::Monday, "09:00-10:00"),
        ];
        let conflicts = audit(&entries);
        let kinds: Vec<ConflictKind> = conflicts.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ConflictKind::Batch, ConflictKind::Room]);
        assert_eq!(conflicts[0].entries, vec!["E1", "E2"]);
        assert_eq!(conflicts[0].message, "Batch B1 has 2 classes at MONDAY 09:00-10:00");
    }
}
