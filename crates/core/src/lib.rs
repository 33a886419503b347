pub mod calendar;
pub mod index;
pub mod scoring;
pub mod substitute;

use std::collections::HashSet;
use thiserror::Error;

pub use types::{
    Algorithm, Assignment, Course, CourseId, PriorityWeights, Room, RoomId, SchedulerOptions,
    TeacherId, TimeSlot, TimetableRequest, TimetableResult, UnscheduledReason,
};

/// Immutable per-run configuration handed to every solver.
#[derive(Clone, Debug)]
pub struct Problem<'a> {
    pub courses: &'a [Course],
    pub rooms: &'a [Room],
    pub slots: Vec<TimeSlot>,
    pub options: &'a SchedulerOptions,
}

impl<'a> Problem<'a> {
    pub fn new<D: AsRef<str>, T: AsRef<str>>(
        courses: &'a [Course],
        rooms: &'a [Room],
        days: &[D],
        times: &[T],
        options: &'a SchedulerOptions,
    ) -> Self {
        Self {
            courses,
            rooms,
            slots: calendar::build_time_slots(days, times),
            options,
        }
    }

    pub fn from_request(req: &'a TimetableRequest) -> Self {
        Self::new(&req.courses, &req.rooms, req.days.as_slice(), req.times.as_slice(), &req.options)
    }

    pub fn weights(&self) -> &PriorityWeights {
        &self.options.priorities
    }

    pub fn course(&self, id: &CourseId) -> Option<&'a Course> {
        self.courses.iter().find(|c| &c.id == id)
    }

    pub fn room(&self, id: &RoomId) -> Option<&'a Room> {
        self.rooms.iter().find(|r| &r.id == id)
    }
}

pub trait Solver: Send + Sync + 'static {
    fn solve(&self, problem: &Problem<'_>) -> Vec<Assignment>;
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid request: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Largest `maxIterations × populationSize` a validated request may ask for.
pub const MAX_GENETIC_WORK: u64 = 5_000_000;
/// Largest backtracking node budget a validated request may ask for.
pub const MAX_BACKTRACK_NODES: u64 = 10_000_000;

/// Structural checks a caller runs before invoking the engine. The engine
/// itself accepts anything and reports infeasibility in-band.
pub fn validate(req: &TimetableRequest) -> Result<(), ValidationError> {
    let mut errors: Vec<String> = Vec::new();

    if req.days.is_empty() {
        errors.push("days is empty".into());
    }
    if req.times.is_empty() {
        errors.push("times is empty".into());
    }
    if req.rooms.is_empty() {
        errors.push("rooms is empty".into());
    }

    fn chk_unique<'a>(name: &str, ids: impl Iterator<Item = &'a str>, errors: &mut Vec<String>) {
        let mut seen = HashSet::new();
        for id in ids {
            if !seen.insert(id) {
                errors.push(format!("duplicate {name}: {id}"));
            }
        }
    }
    chk_unique("day", req.days.iter().map(String::as_str), &mut errors);
    chk_unique("time", req.times.iter().map(String::as_str), &mut errors);
    chk_unique("room id", req.rooms.iter().map(|r| r.id.0.as_str()), &mut errors);
    chk_unique("course id", req.courses.iter().map(|c| c.id.0.as_str()), &mut errors);

    for r in &req.rooms {
        if r.capacity == 0 {
            errors.push(format!("room {} has capacity 0", r.id));
        }
    }

    let opts = &req.options;
    if opts.population_size == 0 {
        errors.push("populationSize must be at least 1".into());
    }
    if !(0.0..=1.0).contains(&opts.mutation_rate) {
        errors.push(format!("mutationRate {} is outside [0, 1]", opts.mutation_rate));
    }
    let work = u64::from(opts.max_iterations).saturating_mul(opts.population_size as u64);
    if work > MAX_GENETIC_WORK {
        errors.push(format!(
            "maxIterations × populationSize is {work}, above {MAX_GENETIC_WORK}"
        ));
    }
    match opts.backtrack_node_limit {
        None => errors.push("backtrackNodeLimit must be set".into()),
        Some(n) if n > MAX_BACKTRACK_NODES => errors.push(format!(
            "backtrackNodeLimit {n} is above {MAX_BACKTRACK_NODES}"
        )),
        Some(_) => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Invalid(errors))
    }
}

/// Courses no room can seat. Not an error: they come back as conflicts.
pub fn unschedulable_courses(req: &TimetableRequest) -> Vec<CourseId> {
    req.courses
        .iter()
        .filter(|c| !req.rooms.iter().any(|r| r.capacity >= c.students))
        .map(|c| c.id.clone())
        .collect()
}
