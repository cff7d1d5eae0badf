//! Academic timetable generation.
//!
//! Places the weekly teaching sessions of student batches onto
//! (day, time-slot, room) tuples so that no batch, faculty member or room
//! is double-booked, faculty availability windows are respected and rooms
//! seat the batch. Placement is a single-pass greedy heuristic: it is fast
//! and deterministic, not globally optimal. Sessions that cannot be placed
//! are reported as warnings rather than errors.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Batch`, `Subject`, `Faculty`, `Classroom`,
//!   `TimetableEntry`, `Conflict`, `GenerationRequest`, `GenerationResult`,
//!   and the weekly time model (`Day`, `TimeSlot`, `SlotCatalog`)
//! - **`scheduler`**: The generator, session placement, room selection,
//!   availability matching and conflict checks
//! - **`store`**: Read-only data access (`DataStore`) and curriculum
//!   resolution (`CurriculumResolver`), with an in-memory JSON store
//! - **`validation`**: Request and dataset integrity checks
//! - **`config`**: TOML generator configuration
//! - **`error`**: Error types
//!
//! # Example
//!
//! ```
//! use u_timetable::models::GenerationRequest;
//! use u_timetable::scheduler::TimetableGenerator;
//! use u_timetable::store::MemoryStore;
//!
//! let store = MemoryStore::from_json_str(r#"{
//!     "batches": [{"id": "B1", "department": "CS", "semester": 5, "studentCount": 40}],
//!     "subjects": [{"id": "S1", "name": "Algorithms", "type": "LECTURE", "weeklyHours": 2, "facultyId": "F1"}],
//!     "faculty": [{"id": "F1", "department": "CS", "availability": {"monday": ["09:00-12:00"]}}],
//!     "classrooms": [{"id": "R1", "name": "A-101", "capacity": 60, "type": "LECTURE_HALL"}]
//! }"#).unwrap();
//!
//! let request = GenerationRequest::new(["B1"], ["09:00-10:00", "10:00-11:00"]);
//! let result = TimetableGenerator::new(store).generate(&request);
//! assert!(result.success);
//! assert_eq!(result.entry_count(), 2);
//! ```
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod store;
pub mod validation;

pub use config::GeneratorConfig;
pub use error::{Result, StoreError, TimetableError};
pub use scheduler::TimetableGenerator;
