//! Timetable entries and conflict records.
//!
//! An entry places one session of a subject for a batch on a
//! (day, time-slot, room). Within a valid timetable no two entries
//! share (batch, day, slot), (faculty, day, slot) or (room, day, slot).

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Day, TimeSlot};

/// Namespace for deterministic entry ids.
const ENTRY_NAMESPACE: Uuid = Uuid::from_u128(0x6c1f_4a52_9e0b_4d8e_a3f4_17c2_5b90_d3e1);

/// A single scheduled session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    pub id: String,
    pub batch_id: String,
    pub subject_id: String,
    pub faculty_id: String,
    pub room_id: String,
    pub day: Day,
    pub time_slot: TimeSlot,
}

impl TimetableEntry {
    /// Creates an entry with an explicit id.
    pub fn new(
        id: impl Into<String>,
        batch_id: impl Into<String>,
        subject_id: impl Into<String>,
        faculty_id: impl Into<String>,
        room_id: impl Into<String>,
        day: Day,
        time_slot: TimeSlot,
    ) -> Self {
        Self {
            id: id.into(),
            batch_id: batch_id.into(),
            subject_id: subject_id.into(),
            faculty_id: faculty_id.into(),
            room_id: room_id.into(),
            day,
            time_slot,
        }
    }

    /// Creates an entry whose id is derived from its placement.
    ///
    /// The same (batch, subject, faculty, room, day, slot) always yields
    /// the same id, so repeated runs over identical inputs are identical.
    pub fn placed(
        batch_id: &str,
        subject_id: &str,
        faculty_id: &str,
        room_id: &str,
        day: Day,
        time_slot: TimeSlot,
    ) -> Self {
        let name = format!("{batch_id}|{subject_id}|{faculty_id}|{room_id}|{day}|{time_slot}");
        let id = Uuid::new_v5(&ENTRY_NAMESPACE, name.as_bytes()).to_string();
        Self::new(id, batch_id, subject_id, faculty_id, room_id, day, time_slot)
    }

    /// Whether this entry occupies (day, slot).
    #[inline]
    pub fn occupies(&self, day: Day, time_slot: TimeSlot) -> bool {
        self.day == day && self.time_slot == time_slot
    }
}

/// Which dimension of a placement collides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictKind {
    Batch,
    Faculty,
    Room,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConflictKind::Batch => "batch",
            ConflictKind::Faculty => "faculty",
            ConflictKind::Room => "room",
        })
    }
}

/// A detected double-booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// Colliding dimension.
    #[serde(rename = "type")]
    pub kind: ConflictKind,
    /// Human-readable description.
    pub message: String,
    /// Ids of the colliding entries.
    pub entries: Vec<String>,
}

impl Conflict {
    pub fn new(kind: ConflictKind, message: impl Into<String>, entries: Vec<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            entries,
        }
    }

    /// Creates a batch conflict.
    pub fn batch(message: impl Into<String>, entries: Vec<String>) -> Self {
        Self::new(ConflictKind::Batch, message, entries)
    }

    /// Creates a faculty conflict.
    pub fn faculty(message: impl Into<String>, entries: Vec<String>) -> Self {
        Self::new(ConflictKind::Faculty, message, entries)
    }

    /// Creates a room conflict.
    pub fn room(message: impl Into<String>, entries: Vec<String>) -> Self {
        Self::new(ConflictKind::Room, message, entries)
    }
}
