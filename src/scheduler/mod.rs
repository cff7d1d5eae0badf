//! Greedy timetable generation and conflict checks.
//!
//! # Algorithm
//!
//! Single pass, no backtracking. Batches are processed in request order and
//! their subjects in load order; each session takes the first (day, slot,
//! room) that the faculty is available for, that neither the batch nor the
//! faculty already occupies, and that has a free room large enough for the
//! batch. Every placement is committed to the run's [`WorkingSet`]
//! immediately, so earlier subjects win scarce slots.
//!
//! # Components
//!
//! | Component | Role |
//! |-----------|------|
//! | [`availability`] | faculty window matching (any overlap counts) |
//! | [`conflict`] | batch/faculty/room collision checks, ad-hoc queries, audit |
//! | [`RoomSelector`] | largest-first room choice |
//! | [`SessionScheduler`] | places the sessions of one (batch, subject) |
//! | [`TimetableGenerator`] | loads data, drives the run, reports the result |
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

pub mod availability;
mod cancel;
pub mod conflict;
mod generator;
mod rooms;
mod session;
mod working_set;

pub use cancel::CancellationToken;
pub use conflict::{audit, check_conflicts, detect_conflicts, ConflictQuery};
pub use generator::TimetableGenerator;
pub use rooms::RoomSelector;
pub use session::{SessionScheduler, SubjectOutcome};
pub use working_set::WorkingSet;
