//! Timetable generation orchestrator.
//!
//! # Algorithm
//!
//! 1. Validate the request; reject it before touching the data store.
//! 2. Load the requested batches (all must exist), every subject with its
//!    faculty, the faculty records, classrooms by capacity and the
//!    existing entries of the requested batches.
//! 3. Seed the working set with the existing entries.
//! 4. For each batch in request order, for each of its subjects in load
//!    order, run the session scheduler against the shared working set.
//! 5. Audit the final working set and return the entries placed by this run.
//!
//! Earlier batches and subjects win scarce slots. There is no backtracking.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use tracing::{debug, error, info};

use crate::config::GeneratorConfig;
use crate::error::{Result, TimetableError};
use crate::models::{
    Batch, Faculty, GenerationConstraints, GenerationOption, GenerationRequest, GenerationResult,
    Preferences, SlotCatalog,
};
use crate::store::{CurriculumResolver, DataStore, DepartmentCurriculum};
use crate::validation::{validate_request, ValidationError, ValidationErrorKind};

use super::conflict::audit;
use super::{CancellationToken, RoomSelector, SessionScheduler, WorkingSet};

/// Generates weekly timetables from a data store snapshot.
///
/// Holds no state between calls; every run builds its own working set.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Availability, Batch, Classroom, Day, Faculty, GenerationRequest, Subject, SubjectType};
/// use u_timetable::scheduler::TimetableGenerator;
/// use u_timetable::store::{Dataset, MemoryStore};
///
/// let weekdays = [Day::Monday, Day::Tuesday, Day::Wednesday, Day::Thursday, Day::Friday];
/// let dataset = Dataset {
///     batches: vec![Batch::new("B1", "CS", 5, 40)],
///     subjects: vec![Subject::new("S1", "Algorithms", SubjectType::Lecture, 3, "F1")],
///     faculty: vec![Faculty::new("F1", "CS")
///         .with_availability(Availability::new().with_days(weekdays, &["09:00-17:00"]))],
///     classrooms: vec![Classroom::hall("R1", "A-101", 60)],
///     timetable_entries: vec![],
/// };
/// let store = MemoryStore::from_dataset(dataset).unwrap();
///
/// let request = GenerationRequest::new(["B1"], ["09:00-10:00", "10:00-11:00"]);
/// let result = TimetableGenerator::new(store).generate(&request);
/// assert!(result.success);
/// assert_eq!(result.entry_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct TimetableGenerator<S, C = DepartmentCurriculum> {
    store: S,
    curriculum: C,
    config: GeneratorConfig,
}

impl<S: DataStore> TimetableGenerator<S> {
    /// Creates a generator with the department curriculum and default config.
    pub fn new(store: S) -> Self {
        Self {
            store,
            curriculum: DepartmentCurriculum,
            config: GeneratorConfig::default(),
        }
    }
}

impl<S: DataStore, C: CurriculumResolver> TimetableGenerator<S, C> {
    /// Replaces the curriculum resolver.
    pub fn with_curriculum<C2: CurriculumResolver>(
        self,
        curriculum: C2,
    ) -> TimetableGenerator<S, C2> {
        TimetableGenerator {
            store: self.store,
            curriculum,
            config: self.config,
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs one generation.
    ///
    /// Never fails: any error yields `success: false`, an empty timetable,
    /// the warnings gathered so far and `error` set.
    pub fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        self.generate_with_cancel(request, None)
    }

    /// Like [`generate`](Self::generate), honouring a cancellation token.
    pub fn generate_with_cancel(
        &self,
        request: &GenerationRequest,
        cancel: Option<&CancellationToken>,
    ) -> GenerationResult {
        let started = Instant::now();
        let mut warnings = Vec::new();
        match self.run(request, cancel, &mut warnings) {
            Ok(mut result) => {
                result.warnings = warnings;
                result.generation_time_ms = elapsed_ms(started);
                result
            }
            Err(e) => {
                error!(error = %e, "timetable generation failed");
                GenerationResult {
                    success: false,
                    timetable: Vec::new(),
                    conflicts: Vec::new(),
                    warnings,
                    generation_time_ms: elapsed_ms(started),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Runs one generation, returning failures as errors.
    ///
    /// # Errors
    /// - [`TimetableError::Validation`] for a malformed request
    /// - [`TimetableError::NotFound`] if a requested batch does not exist
    /// - [`TimetableError::Store`] if the data store fails
    /// - [`TimetableError::Cancelled`] if the token fires
    pub fn try_generate(
        &self,
        request: &GenerationRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<GenerationResult> {
        let started = Instant::now();
        let mut warnings = Vec::new();
        let mut result = self.run(request, cancel, &mut warnings)?;
        result.warnings = warnings;
        result.generation_time_ms = elapsed_ms(started);
        Ok(result)
    }

    /// Generates `count` alternative timetables.
    ///
    /// Option `i` (0-based) prefers morning slots when `i` is even. Each
    /// option runs against its own working set.
    ///
    /// # Errors
    /// [`TimetableError::Validation`] if `count` is outside
    /// `1..=max_options`. Individual options report their own failures.
    pub fn generate_options(
        &self,
        request: &GenerationRequest,
        count: usize,
    ) -> Result<Vec<GenerationOption>> {
        let max = self.config.generation.max_options;
        if count == 0 || count > max {
            return Err(TimetableError::Validation(vec![ValidationError::new(
                ValidationErrorKind::InvalidOptionCount,
                format!("Count must be between 1 and {max}"),
            )]));
        }

        let options = (0..count)
            .map(|i| {
                let preferences = request
                    .preferences
                    .clone()
                    .unwrap_or_default()
                    .with_prefer_morning_slots(i % 2 == 0);
                let variant = request.clone().with_preferences(preferences);
                GenerationOption {
                    option: i + 1,
                    result: self.generate(&variant),
                }
            })
            .collect();
        Ok(options)
    }

    fn run(
        &self,
        request: &GenerationRequest,
        cancel: Option<&CancellationToken>,
        warnings: &mut Vec<String>,
    ) -> Result<GenerationResult> {
        validate_request(request)?;
        let catalog = SlotCatalog::parse(request.time_slots.as_slice())
            .map_err(|e| {
                TimetableError::Validation(vec![ValidationError::new(
                    ValidationErrorKind::InvalidTimeSlot,
                    e.to_string(),
                )])
            })?;
        let constraints = self.constraints_for(request.preferences.as_ref());

        info!(
            batches = request.batch_ids.len(),
            slots = catalog.len(),
            prefer_morning_slots = constraints.prefer_morning_slots,
            "timetable generation started"
        );

        let batches = self.load_batches(&request.batch_ids)?;
        let subjects = self.store.find_all_subjects_with_faculty()?;
        let faculty_ids = unique(subjects.iter().map(|s| s.subject.faculty_id.as_str()));
        let faculty = self.store.find_faculty_by_ids(&faculty_ids)?;
        let faculty_by_id: HashMap<&str, &Faculty> =
            faculty.iter().map(|f| (f.id.as_str(), f)).collect();
        let rooms = RoomSelector::new(self.store.find_classrooms_ordered_by_capacity_desc()?);
        let existing = self.store.find_timetable_entries_for_batches(&request.batch_ids)?;

        debug!(
            subjects = subjects.len(),
            faculty = faculty.len(),
            classrooms = rooms.rooms().len(),
            existing = existing.len(),
            "scheduling data loaded"
        );

        let mut working = WorkingSet::seeded(existing);
        let mut scheduler = SessionScheduler::new(&catalog, &rooms)
            .with_constraints(constraints)
            .with_credit_existing_sessions(self.config.generation.credit_existing_sessions);
        if let Some(token) = cancel {
            scheduler = scheduler.with_cancellation(token);
        }

        for batch in &batches {
            for subject in self.curriculum.subjects_for_batch(batch, &subjects) {
                let faculty = faculty_by_id
                    .get(subject.subject.faculty_id.as_str())
                    .copied()
                    .or(subject.faculty.as_ref());
                let outcome = scheduler.schedule(batch, subject, faculty, &mut working)?;
                warnings.extend(outcome.warnings);
            }
        }

        let conflicts = audit(working.entries());
        let timetable = working.into_generated();

        info!(
            entries = timetable.len(),
            conflicts = conflicts.len(),
            warnings = warnings.len(),
            "timetable generation finished"
        );

        Ok(GenerationResult {
            success: true,
            timetable,
            conflicts,
            ..Default::default()
        })
    }

    /// Requested batches in request order; any missing id fails the run.
    fn load_batches(&self, ids: &[String]) -> Result<Vec<Batch>> {
        let found = self.store.find_batches_by_ids(ids)?;
        let mut by_id: HashMap<String, Batch> =
            found.into_iter().map(|b| (b.id.clone(), b)).collect();
        let mut batches = Vec::with_capacity(ids.len());
        let mut missing = Vec::new();
        for id in ids {
            match by_id.remove(id) {
                Some(batch) => batches.push(batch),
                None => missing.push(id.clone()),
            }
        }
        if !missing.is_empty() {
            return Err(TimetableError::NotFound {
                entity: "batches",
                ids: missing,
            });
        }
        Ok(batches)
    }

    fn constraints_for(&self, preferences: Option<&Preferences>) -> GenerationConstraints {
        GenerationConstraints::resolve(preferences, &self.config.default_constraints())
    }
}

fn unique<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

fn elapsed_ms(started: Instant) -> u64 {
    let millis = started.elapsed().as_millis();
    u64::try_from(millis).unwrap_or(u64::MAX)
}
