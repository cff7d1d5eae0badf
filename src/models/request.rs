//! Generation request and result models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Conflict, TimetableEntry};

/// Caller-supplied scheduling preferences. Omitted fields fall back to
/// the configured defaults (see [`GenerationConstraints::resolve`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avoid_consecutive_classes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefer_morning_slots: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_daily_hours: Option<u32>,
}

impl Preferences {
    pub fn with_prefer_morning_slots(mut self, prefer: bool) -> Self {
        self.prefer_morning_slots = Some(prefer);
        self
    }

    pub fn with_avoid_consecutive_classes(mut self, avoid: bool) -> Self {
        self.avoid_consecutive_classes = Some(avoid);
        self
    }

    pub fn with_max_daily_hours(mut self, hours: u32) -> Self {
        self.max_daily_hours = Some(hours);
        self
    }
}

/// Fully resolved preferences for one run.
///
/// Only `prefer_morning_slots` influences placement (day search order).
/// `avoid_consecutive_classes` and `max_daily_hours` are carried through
/// for callers but are not enforced by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConstraints {
    pub avoid_consecutive_classes: bool,
    pub prefer_morning_slots: bool,
    pub max_daily_hours: u32,
}

impl GenerationConstraints {
    /// Fills unset preference fields from `defaults`.
    pub fn resolve(preferences: Option<&Preferences>, defaults: &GenerationConstraints) -> Self {
        let Some(p) = preferences else {
            return *defaults;
        };
        Self {
            avoid_consecutive_classes: p
                .avoid_consecutive_classes
                .unwrap_or(defaults.avoid_consecutive_classes),
            prefer_morning_slots: p
                .prefer_morning_slots
                .unwrap_or(defaults.prefer_morning_slots),
            max_daily_hours: p.max_daily_hours.unwrap_or(defaults.max_daily_hours),
        }
    }
}

impl Default for GenerationConstraints {
    fn default() -> Self {
        Self {
            avoid_consecutive_classes: true,
            prefer_morning_slots: true,
            max_daily_hours: 8,
        }
    }
}

/// Input to a timetable generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Batches to schedule, in processing order.
    pub batch_ids: Vec<String>,
    /// Start of the term (informational).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// End of the term (informational).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Candidate time-slots (`HH:MM-HH:MM`), searched in order for each day.
    pub time_slots: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Preferences>,
}

impl GenerationRequest {
    /// Creates a request for the given batches and slots.
    pub fn new<B, S>(
        batch_ids: impl IntoIterator<Item = B>,
        time_slots: impl IntoIterator<Item = S>,
    ) -> Self
    where
        B: Into<String>,
        S: Into<String>,
    {
        Self {
            batch_ids: batch_ids.into_iter().map(Into::into).collect(),
            time_slots: time_slots.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Sets the informational date range.
    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Sets the preferences.
    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = Some(preferences);
        self
    }
}

/// Outcome of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    /// `false` if the run failed; `timetable` is then empty.
    pub success: bool,
    /// Entries generated by this run, in placement order.
    pub timetable: Vec<TimetableEntry>,
    /// Double-bookings found in the final working set.
    pub conflicts: Vec<Conflict>,
    /// Scheduling shortfalls.
    pub warnings: Vec<String>,
    /// Wall-clock duration of the run (ms).
    pub generation_time_ms: u64,
    /// Failure description when `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResult {
    /// Number of generated entries.
    pub fn entry_count(&self) -> usize {
        self.timetable.len()
    }

    /// Entries generated for a given batch.
    pub fn entries_for_batch(&self, batch_id: &str) -> Vec<&TimetableEntry> {
        self.timetable
            .iter()
            .filter(|e| e.batch_id == batch_id)
            .collect()
    }

    /// Entries generated for a given subject.
    pub fn entries_for_subject(&self, subject_id: &str) -> Vec<&TimetableEntry> {
        self.timetable
            .iter()
            .filter(|e| e.subject_id == subject_id)
            .collect()
    }
}

/// One of several alternative timetables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOption {
    /// 1-based option number.
    pub option: usize,
    #[serde(flatten)]
    pub result: GenerationResult,
}
