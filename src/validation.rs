//! Input validation for timetable generation.
//!
//! Two entry points:
//! - [`validate_request`] checks the shape of a generation request
//!   before any data is loaded (batch ids present and unique, time-slots
//!   present and well-formed, date range ordered).
//! - [`validate_dataset`] checks the integrity of loaded entities:
//!   duplicate ids and names, dangling faculty references, non-positive
//!   quantities, availability for unknown days, malformed availability
//!   ranges. Sunday availability is ignored with a warning.
//!
//! Both collect every problem found rather than stopping at the first.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::models::{Batch, Classroom, Day, Faculty, GenerationRequest, Subject, TimeSlot};

/// Accepted time-slot shape.
static TIME_SLOT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}:\d{2}-\d{2}:\d{2}$").expect("valid time slot pattern"));

/// Day key accepted in availability maps but never scheduled.
const NON_TEACHING_DAY: &str = "sunday";

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Request lists no batch ids.
    MissingBatches,
    /// Request lists no time-slots.
    MissingTimeSlots,
    /// A time-slot is not `HH:MM-HH:MM` or is not a valid interval.
    InvalidTimeSlot,
    /// Start date after end date.
    InvalidDateRange,
    /// Two entities share the same ID (or a request repeats an ID).
    DuplicateId,
    /// Two entities share a key that must be unique (room name, batch cohort).
    DuplicateKey,
    /// A subject references a faculty member that doesn't exist.
    InvalidFacultyReference,
    /// A count or capacity that must be positive is zero.
    NonPositiveValue,
    /// An availability range or day key is malformed.
    InvalidAvailability,
    /// Requested number of alternative timetables is out of range.
    InvalidOptionCount,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a generation request.
///
/// Checks:
/// 1. At least one batch id, with no repeats
/// 2. At least one time-slot
/// 3. Every time-slot matches `^\d{2}:\d{2}-\d{2}:\d{2}$` and denotes a
///    real, non-empty interval
/// 4. `start_date <= end_date` when both are given
pub fn validate_request(request: &GenerationRequest) -> ValidationResult {
    let mut errors = Vec::new();

    if request.batch_ids.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingBatches,
            "At least one batch ID is required",
        ));
    }

    let mut seen = HashSet::new();
    for id in &request.batch_ids {
        if !seen.insert(id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate batch ID in request: {id}"),
            ));
        }
    }

    if request.time_slots.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingTimeSlots,
            "At least one time slot is required",
        ));
    }

    for slot in &request.time_slots {
        if !TIME_SLOT_PATTERN.is_match(slot) || slot.parse::<TimeSlot>().is_err() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTimeSlot,
                format!("Invalid time slot format: {slot}"),
            ));
        }
    }

    if let (Some(start), Some(end)) = (request.start_date, request.end_date) {
        if start > end {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDateRange,
                format!("Start date {start} is after end date {end}"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates the integrity of a set of timetabling entities.
///
/// Checks:
/// 1. No duplicate ids within batches, subjects, faculty, classrooms
/// 2. No duplicate classroom names
/// 3. No two batches with the same (department, semester)
/// 4. Every subject's faculty exists
/// 5. Positive semester, student count, weekly hours and capacity
/// 6. Availability keys are day names and ranges are `HH:MM-HH:MM`
pub fn validate_dataset(
    batches: &[Batch],
    subjects: &[Subject],
    faculty: &[Faculty],
    classrooms: &[Classroom],
) -> ValidationResult {
    let mut errors = Vec::new();

    check_unique_ids("batch", batches.iter().map(|b| b.id.as_str()), &mut errors);
    check_unique_ids("subject", subjects.iter().map(|s| s.id.as_str()), &mut errors);
    check_unique_ids("faculty", faculty.iter().map(|f| f.id.as_str()), &mut errors);
    check_unique_ids("classroom", classrooms.iter().map(|c| c.id.as_str()), &mut errors);

    let mut room_names = HashSet::new();
    for room in classrooms {
        if !room_names.insert(room.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateKey,
                format!("Duplicate classroom name: {}", room.name),
            ));
        }
        if room.capacity == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveValue,
                format!("Classroom '{}' must have a positive capacity", room.id),
            ));
        }
    }

    let mut cohorts = HashSet::new();
    for batch in batches {
        if !cohorts.insert((batch.department.as_str(), batch.semester)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateKey,
                format!(
                    "Duplicate batch for {} semester {}",
                    batch.department, batch.semester
                ),
            ));
        }
        if batch.semester == 0 || batch.student_count == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveValue,
                format!(
                    "Batch '{}' must have a positive semester and student count",
                    batch.id
                ),
            ));
        }
    }

    let faculty_ids: HashSet<&str> = faculty.iter().map(|f| f.id.as_str()).collect();
    for subject in subjects {
        if !faculty_ids.contains(subject.faculty_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidFacultyReference,
                format!(
                    "Subject '{}' references unknown faculty '{}'",
                    subject.id, subject.faculty_id
                ),
            ));
        }
        if subject.weekly_hours == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveValue,
                format!("Subject '{}' must have positive weekly hours", subject.id),
            ));
        }
    }

    for member in faculty {
        for (day, ranges) in member.availability.iter() {
            if day == NON_TEACHING_DAY {
                warn!(faculty = %member.id, "ignoring availability declared for {day}");
                continue;
            }
            if !Day::ALL.iter().any(|d| d.key() == day) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidAvailability,
                    format!("Faculty '{}' has availability for unknown day '{day}'", member.id),
                ));
            }
            for range in ranges {
                if range.parse::<TimeSlot>().is_err() {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidAvailability,
                        format!(
                            "Faculty '{}' has malformed availability range '{range}' on {day}",
                            member.id
                        ),
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_unique_ids<'a>(
    entity: &str,
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {entity} ID: {id}"),
            ));
        }
    }
}
