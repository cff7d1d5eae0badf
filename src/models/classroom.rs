//! Classroom model.

use serde::{Deserialize, Serialize};

/// Room classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomType {
    LectureHall,
    Lab,
}

/// A physical room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classroom {
    /// Unique room identifier.
    pub id: String,
    /// Unique room name (e.g., "A-101").
    pub name: String,
    /// Seats available.
    pub capacity: u32,
    /// Hall or lab.
    #[serde(rename = "type")]
    pub room_type: RoomType,
}

impl Classroom {
    /// Creates a new classroom.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        capacity: u32,
        room_type: RoomType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            capacity,
            room_type,
        }
    }

    /// Creates a lecture hall.
    pub fn hall(id: impl Into<String>, name: impl Into<String>, capacity: u32) -> Self {
        Self::new(id, name, capacity, RoomType::LectureHall)
    }

    /// Creates a lab.
    pub fn lab(id: impl Into<String>, name: impl Into<String>, capacity: u32) -> Self {
        Self::new(id, name, capacity, RoomType::Lab)
    }

    /// Whether the room seats `students`.
    #[inline]
    pub fn fits(&self, students: u32) -> bool {
        self.capacity >= students
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits() {
        let r = Classroom::hall("R1", "A-101", 60);
        assert!(r.fits(40));
        assert!(r.fits(60));
        assert!(!r.fits(61));
    }

    #[test]
    fn test_room_type_serde() {
        let r = Classroom::lab("R2", "Lab-1", 30);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["type"], "LAB");
        let hall = serde_json::to_value(Classroom::hall("R1", "A", 10)).unwrap();
        assert_eq!(hall["type"], "LECTURE_HALL");
    }
}
