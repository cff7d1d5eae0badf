//! Room selection.
//!
//! # Algorithm
//! Rooms are searched largest-capacity first, ties kept in listing order.
//! The first room that seats the batch and is free at (day, slot) wins.
//! Given identical inputs the same room is always chosen.

use crate::models::{Classroom, Day, TimeSlot};

use super::WorkingSet;

/// Picks rooms for placements from a fixed search order.
#[derive(Debug, Clone, Default)]
pub struct RoomSelector {
    rooms: Vec<Classroom>,
}

impl RoomSelector {
    /// Creates a selector. Rooms are stably sorted by capacity, descending.
    pub fn new(mut rooms: Vec<Classroom>) -> Self {
        rooms.sort_by(|a, b| b.capacity.cmp(&a.capacity));
        Self { rooms }
    }

    /// Rooms in search order.
    pub fn rooms(&self) -> &[Classroom] {
        &self.rooms
    }

    /// First room seating `required` students that is free at (day, slot).
    pub fn select(
        &self,
        day: Day,
        slot: TimeSlot,
        working: &WorkingSet,
        required: u32,
    ) -> Option<&Classroom> {
        self.rooms
            .iter()
            .find(|room| room.fits(required) && working.is_room_free(&room.id, day, slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimetableEntry;

    fn slot(s: &str) -> TimeSlot {
        s.parse().unwrap()
    }

    fn rooms() -> Vec<Classroom> {
        vec![
            Classroom::hall("R1", "Small", 30),
            Classroom::hall("R2", "Big", 120),
            Classroom::lab("R3", "Lab", 30),
            Classroom::hall("R4", "Medium", 60),
        ]
    }

    #[test]
    fn test_search_order() {
        let selector = RoomSelector::new(rooms());
        let ids: Vec<&str> = selector.rooms().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["R2", "R4", "R1", "R3"]);
    }

    #[test]
    fn test_largest_free_room_first() {
        let selector = RoomSelector::new(rooms());
        let working = WorkingSet::new();
        let room = selector.select(Day::Monday, slot("09:00-10:00"), &working, 25).unwrap();
        assert_eq!(room.id, "R2");
    }

    #[test]
    fn test_skips_occupied_rooms() {
        let selector = RoomSelector::new(rooms());
        let working = WorkingSet::seeded(vec![TimetableEntry::new(
            "E1", "B9", "S9", "F9", "R2", Day::Monday, slot("09:00-10:00"),
        )]);
        let room = selector.select(Day::Monday, slot("09:00-10:00"), &working, 25).unwrap();
        assert_eq!(room.id, "R4");
        // other slot unaffected
        let room = selector.select(Day::Monday, slot("10:00-11:00"), &working, 25).unwrap();
        assert_eq!(room.id, "R2");
    }

    #[test]
    fn test_capacity_gate() {
        let selector = RoomSelector::new(rooms());
        let working = WorkingSet::new();
        assert!(selector.select(Day::Monday, slot("09:00-10:00"), &working, 121).is_none());
        assert_eq!(
            selector
                .select(Day::Monday, slot("09:00-10:00"), &working, 120)
                .unwrap()
                .id,
            "R2"
        );
    }

    #[test]
    fn test_no_rooms() {
        let selector = RoomSelector::new(Vec::new());
        assert!(selector
            .select(Day::Monday, slot("09:00-10:00"), &WorkingSet::new(), 1)
            .is_none());
    }
}
