//! Weekly time model: teaching days, time-slots and the slot catalog.
//!
//! # Time Model
//! Slot boundaries are minutes since midnight, written `HH:MM`.
//! A slot is the half-open interval [start, end): it includes its start
//! and excludes its end, so back-to-back slots never overlap.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A teaching day. The week runs Monday through Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    /// All teaching days in calendar order.
    pub const ALL: [Day; 6] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    /// Upper-case name (`MONDAY`), as stored on timetable entries.
    pub fn as_str(self) -> &'static str {
        match self {
            Day::Monday => "MONDAY",
            Day::Tuesday => "TUESDAY",
            Day::Wednesday => "WEDNESDAY",
            Day::Thursday => "THURSDAY",
            Day::Friday => "FRIDAY",
            Day::Saturday => "SATURDAY",
        }
    }

    /// Lower-case name (`monday`), as used for faculty availability keys.
    pub fn key(self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
        }
    }

    /// Day search order for session placement.
    ///
    /// Morning preference keeps weekdays ahead of Saturday and earlier
    /// days first, which is the calendar order; without the preference
    /// the calendar order is used as well.
    pub fn search_order(prefer_morning_slots: bool) -> [Day; 6] {
        if prefer_morning_slots {
            [
                Day::Monday,
                Day::Tuesday,
                Day::Wednesday,
                Day::Thursday,
                Day::Friday,
                Day::Saturday,
            ]
        } else {
            Self::ALL
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Day {
    type Err = TimeParseError;

    /// Parses a day name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Day::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TimeParseError::UnknownDay(s.to_string()))
    }
}

/// Error produced when parsing days, clock times or slots.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeParseError {
    #[error("unknown day '{0}'")]
    UnknownDay(String),
    #[error("invalid clock time '{0}' (expected HH:MM)")]
    InvalidClock(String),
    #[error("invalid time slot '{0}' (expected HH:MM-HH:MM)")]
    InvalidFormat(String),
    #[error("time slot '{0}' must end after it starts")]
    EmptyRange(String),
}

/// Converts `HH:MM` to minutes since midnight. `24:00` is accepted as end of day.
pub fn clock_to_minutes(clock: &str) -> Result<u16, TimeParseError> {
    let invalid = || TimeParseError::InvalidClock(clock.to_string());
    let (h, m) = clock.split_once(':').ok_or_else(invalid)?;
    let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(h) || !two_digits(m) {
        return Err(invalid());
    }
    let hours: u16 = h.parse().map_err(|_| invalid())?;
    let minutes: u16 = m.parse().map_err(|_| invalid())?;
    if minutes > 59 || hours > 24 || (hours == 24 && minutes > 0) {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

/// Formats minutes since midnight as `HH:MM`.
pub fn minutes_to_clock(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// A time-slot [start, end) within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot {
    start: u16,
    end: u16,
}

impl TimeSlot {
    /// Creates a slot from minute boundaries.
    pub fn new(start: u16, end: u16) -> Result<Self, TimeParseError> {
        if end <= start {
            return Err(TimeParseError::EmptyRange(format!(
                "{}-{}",
                minutes_to_clock(start),
                minutes_to_clock(end)
            )));
        }
        Ok(Self { start, end })
    }

    /// Slot start (minutes since midnight).
    #[inline]
    pub fn start(&self) -> u16 {
        self.start
    }

    /// Slot end (minutes since midnight, exclusive).
    #[inline]
    pub fn end(&self) -> u16 {
        self.end
    }

    /// Slot length in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> u16 {
        self.end - self.start
    }

    /// Whether two slots overlap. Touching slots do not.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            minutes_to_clock(self.start),
            minutes_to_clock(self.end)
        )
    }
}

impl FromStr for TimeSlot {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TimeParseError::InvalidFormat(s.to_string());
        let (start, end) = s.split_once('-').ok_or_else(invalid)?;
        let start = clock_to_minutes(start).map_err(|_| invalid())?;
        let end = clock_to_minutes(end).map_err(|_| invalid())?;
        if end <= start {
            return Err(TimeParseError::EmptyRange(s.to_string()));
        }
        Ok(Self { start, end })
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = TimeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.to_string()
    }
}

/// Overlap test on `HH:MM-HH:MM` strings.
///
/// Unparseable ranges never overlap anything.
pub fn overlaps(a: &str, b: &str) -> bool {
    match (a.parse::<TimeSlot>(), b.parse::<TimeSlot>()) {
        (Ok(a), Ok(b)) => a.overlaps(&b),
        _ => false,
    }
}

/// Default catalog: ten one-hour slots from 08:00 to 18:00.
pub const DEFAULT_SLOTS: [&str; 10] = [
    "08:00-09:00",
    "09:00-10:00",
    "10:00-11:00",
    "11:00-12:00",
    "12:00-13:00",
    "13:00-14:00",
    "14:00-15:00",
    "15:00-16:00",
    "16:00-17:00",
    "17:00-18:00",
];

/// Ordered list of candidate time-slots searched for each day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCatalog {
    slots: Vec<TimeSlot>,
}

impl SlotCatalog {
    /// Creates a catalog from slots, keeping their order.
    pub fn new(slots: Vec<TimeSlot>) -> Self {
        Self { slots }
    }

    /// Parses a catalog from `HH:MM-HH:MM` strings, keeping their order.
    pub fn parse<S: AsRef<str>>(slots: &[S]) -> Result<Self, TimeParseError> {
        let slots = slots
            .iter()
            .map(|s| s.as_ref().parse())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { slots })
    }

    /// Slots in search order.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = TimeSlot> + '_ {
        self.slots.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for SlotCatalog {
    fn default() -> Self {
        let slots = DEFAULT_SLOTS
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        Self { slots }
    }
}
