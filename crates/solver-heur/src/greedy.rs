use sched_core::index::{OccupancyIndex, Placement, ScheduleLedger, TeacherSchedule};
use sched_core::scoring::{assignment_score, course_priority};
use sched_core::{Assignment, Course, Problem, Room, Solver, TimeSlot, UnscheduledReason};
use tracing::{debug, info};

/// Priority-ordered single pass; never revisits a decision.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedySolver;

impl GreedySolver {
    pub fn new() -> Self {
        Self
    }
}

impl Solver for GreedySolver {
    fn solve(&self, problem: &Problem<'_>) -> Vec<Assignment> {
        solve_greedy(problem)
    }
}

pub fn solve_greedy(problem: &Problem<'_>) -> Vec<Assignment> {
    info!(
        courses = problem.courses.len(),
        rooms = problem.rooms.len(),
        slots = problem.slots.len(),
        "greedy solve"
    );

    // Stable sort: equal priorities keep input order.
    let mut order: Vec<&Course> = problem.courses.iter().collect();
    order.sort_by(|a, b| course_priority(b).total_cmp(&course_priority(a)));

    let mut ledger = ScheduleLedger::new();
    let mut assignments = Vec::with_capacity(order.len());

    for course in order {
        match find_best_slot(problem, course, &ledger.rooms, Some(&ledger.teachers)) {
            Some(best) => {
                ledger.commit(&best.placement(course));
                assignments.push(best.into_assignment(course));
            }
            None => {
                let reason = diagnose(problem, course, &ledger.rooms);
                debug!(course = %course.id, %reason, "course left unscheduled");
                assignments.push(Assignment::unscheduled(course, reason));
            }
        }
    }

    let conflicts = assignments.iter().filter(|a| a.conflict).count();
    info!(
        scheduled = assignments.len() - conflicts,
        conflicts, "greedy solve finished"
    );
    assignments
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Candidate<'p> {
    pub slot: &'p TimeSlot,
    pub room: &'p Room,
    pub score: f64,
}

impl Candidate<'_> {
    pub fn placement(&self, course: &Course) -> Placement {
        Placement {
            day: self.slot.day.clone(),
            time: self.slot.time.clone(),
            room: self.room.id.clone(),
            teacher: course.teacher.clone(),
        }
    }

    pub fn into_assignment(self, course: &Course) -> Assignment {
        Assignment::placed(course, self.room, self.slot, Some(self.score))
    }
}

/// Slots a course may use: its preferred times when it declares any.
pub(crate) fn candidate_slots<'p>(problem: &'p Problem<'_>, course: &Course) -> Vec<&'p TimeSlot> {
    if course.preferred_slots.is_empty() {
        problem.slots.iter().collect()
    } else {
        problem
            .slots
            .iter()
            .filter(|s| course.preferred_slots.contains(&s.time))
            .collect()
    }
}

/// Highest-scoring free (slot, room) for `course`, scanning slot-major and
/// room-minor; the first candidate wins ties. Teacher clashes are only
/// checked when a schedule is supplied.
pub(crate) fn find_best_slot<'p>(
    problem: &'p Problem<'_>,
    course: &Course,
    rooms: &OccupancyIndex,
    teachers: Option<&TeacherSchedule>,
) -> Option<Candidate<'p>> {
    let weights = problem.weights();
    let mut best: Option<Candidate<'p>> = None;

    for slot in candidate_slots(problem, course) {
        for room in problem.rooms {
            if rooms.is_taken(&slot.day, &slot.time, &room.id) {
                continue;
            }
            if room.capacity < course.students {
                continue;
            }
            if teachers.is_some_and(|t| t.is_busy(&course.teacher, &slot.day, &slot.time)) {
                continue;
            }

            let score = assignment_score(course, room, slot, weights);
            if best.map_or(true, |b| score > b.score) {
                best = Some(Candidate { slot, room, score });
            }
        }
    }
    best
}

/// Why `course` has no candidate, given that the best-slot search came back empty.
pub(crate) fn diagnose(
    problem: &Problem<'_>,
    course: &Course,
    rooms: &OccupancyIndex,
) -> UnscheduledReason {
    let slots = candidate_slots(problem, course);
    if slots.is_empty() {
        return UnscheduledReason::NoTimeSlots;
    }
    let fitting: Vec<&Room> = problem
        .rooms
        .iter()
        .filter(|r| r.capacity >= course.students)
        .collect();
    if fitting.is_empty() {
        return UnscheduledReason::InsufficientCapacity;
    }
    let free_room_somewhere = slots.iter().any(|s| {
        fitting
            .iter()
            .any(|r| !rooms.is_taken(&s.day, &s.time, &r.id))
    });
    // A free room that was still rejected can only have clashed with the teacher.
    if free_room_somewhere {
        UnscheduledReason::TeacherConflict
    } else {
        UnscheduledReason::RoomsOccupied
    }
}
