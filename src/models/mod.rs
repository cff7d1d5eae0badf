//! Timetabling domain models.
//!
//! Provides the data types describing a timetabling problem (batches,
//! subjects, faculty, classrooms, the weekly time grid) and its
//! solution (timetable entries, conflicts, generation results).
//!
//! # Domain Mappings
//!
//! | u-timetable | Generic scheduling |
//! |-------------|--------------------|
//! | Subject session | Activity |
//! | Batch, Faculty | Resources that cannot be double-booked |
//! | Classroom | Capacity-constrained resource |
//! | TimetableEntry | Assignment |

mod batch;
mod classroom;
mod entry;
mod faculty;
mod request;
mod subject;
pub mod time;

pub use batch::Batch;
pub use classroom::{Classroom, RoomType};
pub use entry::{Conflict, ConflictKind, TimetableEntry};
pub use faculty::{Availability, Faculty};
pub use request::{
    GenerationConstraints, GenerationOption, GenerationRequest, GenerationResult, Preferences,
};
pub use subject::{Subject, SubjectType, SubjectWithFaculty};
pub use time::{Day, SlotCatalog, TimeParseError, TimeSlot};
