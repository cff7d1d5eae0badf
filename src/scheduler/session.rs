//! Session placement for one (batch, subject) pair.
//!
//! # Algorithm
//!
//! 1. Without a faculty record, warn and place nothing.
//! 2. Target = `required_sessions` (minus sessions the batch already holds
//!    for the subject, when crediting is on).
//! 3. For each session: scan days in search order, skipping days the
//!    faculty declares no availability for; scan slots in catalog order,
//!    skipping unavailable or conflicting slots; the first slot with a
//!    free, large-enough room is taken and committed to the working set.
//! 4. The first session that cannot be placed ends the subject with a
//!    shortfall warning. Nothing is retried or undone.
//!
//! # Complexity
//! O(s * d * t * r) per subject, where s=sessions, d=days, t=slots, r=rooms.

use tracing::{debug, trace, warn};

use crate::error::{Result, TimetableError};
use crate::models::{
    Batch, Classroom, Day, Faculty, GenerationConstraints, SlotCatalog, SubjectWithFaculty,
    TimeSlot, TimetableEntry,
};

use super::availability::is_available;
use super::conflict::detect_conflicts;
use super::{CancellationToken, RoomSelector, WorkingSet};

/// What happened for one (batch, subject) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectOutcome {
    /// Sessions the subject needs per week.
    pub required: u32,
    /// Sessions credited from entries already in the working set.
    pub credited: u32,
    /// Sessions placed by this call.
    pub placed: u32,
    /// Shortfall warnings.
    pub warnings: Vec<String>,
}

impl SubjectOutcome {
    /// Whether the weekly requirement is met.
    pub fn is_complete(&self) -> bool {
        self.credited + self.placed >= self.required
    }
}

/// Places the sessions of one subject for one batch.
#[derive(Debug, Clone)]
pub struct SessionScheduler<'a> {
    catalog: &'a SlotCatalog,
    rooms: &'a RoomSelector,
    constraints: GenerationConstraints,
    credit_existing_sessions: bool,
    cancel: Option<&'a CancellationToken>,
}

impl<'a> SessionScheduler<'a> {
    /// Creates a scheduler over a slot catalog and room search order.
    pub fn new(catalog: &'a SlotCatalog, rooms: &'a RoomSelector) -> Self {
        Self {
            catalog,
            rooms,
            constraints: GenerationConstraints::default(),
            credit_existing_sessions: true,
            cancel: None,
        }
    }

    /// Sets the resolved preferences.
    pub fn with_constraints(mut self, constraints: GenerationConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Whether sessions already in the working set count toward the requirement.
    pub fn with_credit_existing_sessions(mut self, credit: bool) -> Self {
        self.credit_existing_sessions = credit;
        self
    }

    /// Sets a cancellation token, checked before each session.
    pub fn with_cancellation(mut self, token: &'a CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Schedules `subject` for `batch`, committing placements to `working`.
    ///
    /// `faculty` is the subject's resolved faculty record, if any.
    ///
    /// # Errors
    /// [`TimetableError::Cancelled`] if the token fires; sessions placed
    /// before that remain in `working`.
    pub fn schedule(
        &self,
        batch: &Batch,
        subject: &SubjectWithFaculty,
        faculty: Option<&Faculty>,
        working: &mut WorkingSet,
    ) -> Result<SubjectOutcome> {
        let subject = &subject.subject;
        let mut outcome = SubjectOutcome {
            required: subject.required_sessions(),
            ..Default::default()
        };

        let Some(faculty) = faculty else {
            warn!(subject = %subject.id, "no faculty for subject");
            outcome
                .warnings
                .push(format!("No faculty found for subject: {}", subject.name));
            return Ok(outcome);
        };

        if self.credit_existing_sessions {
            outcome.credited = working
                .session_count(&batch.id, &subject.id)
                .min(outcome.required);
        }
        let target = outcome.required - outcome.credited;

        while outcome.placed < target {
            if self.cancel.is_some_and(CancellationToken::is_cancelled) {
                return Err(TimetableError::Cancelled);
            }
            let Some((day, slot, room)) = self.find_placement(batch, faculty, working) else {
                break;
            };
            let entry =
                TimetableEntry::placed(&batch.id, &subject.id, &faculty.id, &room.id, day, slot);
            debug!(
                batch = %batch.id,
                subject = %subject.id,
                room = %room.id,
                %day,
                %slot,
                "session placed"
            );
            working.insert(entry);
            outcome.placed += 1;
        }

        if outcome.placed < target {
            warn!(
                batch = %batch.id,
                subject = %subject.id,
                placed = outcome.placed,
                target,
                "sessions left unscheduled"
            );
            outcome.warnings.push(format!(
                "Could not schedule all sessions for {} in {} {}",
                subject.name, batch.department, batch.semester
            ));
        }

        Ok(outcome)
    }

    /// First acceptable (day, slot, room) for the next session.
    fn find_placement(
        &self,
        batch: &Batch,
        faculty: &Faculty,
        working: &WorkingSet,
    ) -> Option<(Day, TimeSlot, &'a Classroom)> {
        for day in Day::search_order(self.constraints.prefer_morning_slots) {
            if !faculty.availability.has_day(day) {
                continue;
            }
            for slot in self.catalog.iter() {
                if !is_available(&faculty.availability, day, &slot) {
                    continue;
                }
                let conflicts = detect_conflicts(batch, faculty, None, day, slot, working);
                if !conflicts.is_empty() {
                    trace!(%day, %slot, count = conflicts.len(), "slot rejected");
                    continue;
                }
                if let Some(room) = self.rooms.select(day, slot, working, batch.student_count) {
                    return Some((day, slot, room));
                }
            }
        }
        None
    }
}
