//! The working set of a generation run.
//!
//! Holds every entry the run must respect: entries that already existed
//! for the requested batches (seeded) followed by the entries placed so
//! far. Lookups by (owner, day, slot) are indexed per dimension.

use std::collections::HashMap;

use crate::models::{Day, TimeSlot, TimetableEntry};

type SlotIndex = HashMap<String, HashMap<(Day, TimeSlot), Vec<usize>>>;

/// Entries visible to conflict checks during one run.
///
/// Owned by the orchestrator for the lifetime of a single `generate` call
/// and threaded explicitly through the session scheduler. Independent runs
/// use independent working sets.
#[derive(Debug, Clone, Default)]
pub struct WorkingSet {
    entries: Vec<TimetableEntry>,
    seeded: usize,
    by_batch: SlotIndex,
    by_faculty: SlotIndex,
    by_room: SlotIndex,
    sessions: HashMap<(String, String), u32>,
}

impl WorkingSet {
    /// Creates an empty working set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a working set seeded with pre-existing entries.
    pub fn seeded(existing: impl IntoIterator<Item = TimetableEntry>) -> Self {
        let mut set = Self::new();
        for entry in existing {
            set.insert(entry);
        }
        set.seeded = set.entries.len();
        set
    }

    /// Adds an entry. Later lookups see it immediately.
    pub fn insert(&mut self, entry: TimetableEntry) {
        let idx = self.entries.len();
        let key = (entry.day, entry.time_slot);
        index(&mut self.by_batch, &entry.batch_id, key, idx);
        index(&mut self.by_faculty, &entry.faculty_id, key, idx);
        index(&mut self.by_room, &entry.room_id, key, idx);
        *self
            .sessions
            .entry((entry.batch_id.clone(), entry.subject_id.clone()))
            .or_insert(0) += 1;
        self.entries.push(entry);
    }

    /// Entries of `batch_id` at (day, slot).
    pub fn batch_entries_at(
        &self,
        batch_id: &str,
        day: Day,
        slot: TimeSlot,
    ) -> Vec<&TimetableEntry> {
        self.lookup(&self.by_batch, batch_id, day, slot)
    }

    /// Entries of `faculty_id` at (day, slot).
    pub fn faculty_entries_at(
        &self,
        faculty_id: &str,
        day: Day,
        slot: TimeSlot,
    ) -> Vec<&TimetableEntry> {
        self.lookup(&self.by_faculty, faculty_id, day, slot)
    }

    /// Entries in `room_id` at (day, slot).
    pub fn room_entries_at(&self, room_id: &str, day: Day, slot: TimeSlot) -> Vec<&TimetableEntry> {
        self.lookup(&self.by_room, room_id, day, slot)
    }

    /// Whether `room_id` has no entry at (day, slot).
    pub fn is_room_free(&self, room_id: &str, day: Day, slot: TimeSlot) -> bool {
        self.by_room
            .get(room_id)
            .and_then(|slots| slots.get(&(day, slot)))
            .map_or(true, |hits| hits.is_empty())
    }

    /// Number of sessions of `subject_id` already held by `batch_id`.
    pub fn session_count(&self, batch_id: &str, subject_id: &str) -> u32 {
        self.sessions
            .get(&(batch_id.to_string(), subject_id.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// All entries: seeded first, then placed ones in placement order.
    pub fn entries(&self) -> &[TimetableEntry] {
        &self.entries
    }

    /// Entries placed during this run.
    pub fn generated(&self) -> &[TimetableEntry] {
        &self.entries[self.seeded..]
    }

    /// Consumes the set, returning the entries placed during this run.
    pub fn into_generated(mut self) -> Vec<TimetableEntry> {
        self.entries.split_off(self.seeded)
    }

    /// Number of seeded entries.
    pub fn seeded_len(&self) -> usize {
        self.seeded
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(
        &self,
        index: &SlotIndex,
        owner: &str,
        day: Day,
        slot: TimeSlot,
    ) -> Vec<&TimetableEntry> {
        index
            .get(owner)
            .and_then(|slots| slots.get(&(day, slot)))
            .map(|hits| hits.iter().map(|&i| &self.entries[i]).collect())
            .unwrap_or_default()
    }
}

fn index(index: &mut SlotIndex, owner: &str, key: (Day, TimeSlot), idx: usize) {
    index
        .entry(owner.to_string())
        .or_default()
        .entry(key)
        .or_default()
        .push(idx);
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
        subject: &str,
        faculty: &str,
        room: &str,
        day: Day,
        at: &str,
    ) -> TimetableEntry {
        TimetableEntry::new(id, batch, subject, faculty, room, day, slot(at))
    }

    #[test]
    fn test_seeded_and_generated_split() {
        let seed = entry("E1", "B1", "S1", "F1", "R1", Day::Monday, "09:00-10:00");
        let mut set = WorkingSet::seeded(vec![seed]);
        assert_eq!(set.seeded_len(), 1);
        assert!(set.generated().is_empty());

        set.insert(entry("E2", "B1", "S1", "F1", "R1", Day::Tuesday, "09:00-10:00"));
        assert_eq!(set.len(), 2);
        assert_eq!(set.generated().len(), 1);
        assert_eq!(set.generated()[0].id, "E2");

        let generated = set.into_generated();
        assert_eq!(generated.len(), 1);
        assert_eq!(generated[0].id, "E2");
    }

    #[test]
    fn test_lookups_by_dimension() {
        let mut set = WorkingSet::new();
        set.insert(entry("E1", "B1", "S1", "F1", "R1", Day::Monday, "09:00-10:00"));
        set.insert(entry("E2", "B2", "S2", "F1", "R2", Day::Monday, "09:00-10:00"));

        assert_eq!(set.batch_entries_at("B1", Day::Monday, slot("09:00-10:00")).len(), 1);
        assert_eq!(set.faculty_entries_at("F1", Day::Monday, slot("09:00-10:00")).len(), 2);
        assert!(set.batch_entries_at("B1", Day::Monday, slot("10:00-11:00")).is_empty());
        assert!(set.batch_entries_at("B1", Day::Tuesday, slot("09:00-10:00")).is_empty());
        assert!(set.faculty_entries_at("F9", Day::Monday, slot("09:00-10:00")).is_empty());
        assert_eq!(set.room_entries_at("R2", Day::Monday, slot("09:00-10:00"))[0].id, "E2");
    }

    #[test]
    fn test_room_free() {
        let mut set = WorkingSet::new();
        set.insert(entry("E1", "B1", "S1", "F1", "R1", Day::Monday, "09:00-10:00"));
        assert!(!set.is_room_free("R1", Day::Monday, slot("09:00-10:00")));
        assert!(set.is_room_free("R1", Day::Monday, slot("10:00-11:00")));
        assert!(set.is_room_free("R2", Day::Monday, slot("09:00-10:00")));
    }

    #[test]
    fn test_session_count() {
        let mut set = WorkingSet::seeded(vec![
            entry("E1", "B1", "S1", "F1", "R1", Day::Monday, "09:00-10:00"),
            entry("E2", "B1", "S1", "F1", "R1", Day::Tuesday, "09:00-10:00"),
        ]);
        set.insert(entry("E3", "B1", "S2", "F2", "R1", Day::Monday, "10:00-11:00"));
        assert_eq!(set.session_count("B1", "S1"), 2);
        assert_eq!(set.session_count("B1", "S2"), 1);
        assert_eq!(set.session_count("B2", "S1"), 0);
    }
}
