use sched_core::index::{Placement, ScheduleLedger};
use sched_core::scoring::assignment_score;
use sched_core::{Assignment, Problem, Solver};
use tracing::{info, warn};

use crate::greedy::solve_greedy;

/// Depth-first search over courses in input order. Falls back to the greedy
/// solver when no complete timetable is found within the node budget.
#[derive(Clone, Copy, Debug, Default)]
pub struct BacktrackSolver;

impl BacktrackSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Solver for BacktrackSolver {
    fn solve(&self, problem: &Problem<'_>) -> Vec<Assignment> {
        solve_backtracking(problem).assignments
    }
}

#[derive(Clone, Debug)]
pub struct BacktrackOutcome {
    pub assignments: Vec<Assignment>,
    /// Tentative placements tried.
    pub nodes: u64,
    pub fell_back: bool,
    pub budget_exhausted: bool,
}

pub fn solve_backtracking(problem: &Problem<'_>) -> BacktrackOutcome {
    info!(
        courses = problem.courses.len(),
        rooms = problem.rooms.len(),
        slots = problem.slots.len(),
        limit = ?problem.options.backtrack_node_limit,
        "backtracking solve"
    );

    let mut search = Search {
        problem,
        ledger: ScheduleLedger::new(),
        placed: Vec::with_capacity(problem.courses.len()),
        nodes: 0,
        limit: problem.options.backtrack_node_limit,
        exhausted: false,
    };

    if search.run() {
        info!(nodes = search.nodes, "backtracking found a complete timetable");
        return BacktrackOutcome {
            assignments: search.placed,
            nodes: search.nodes,
            fell_back: false,
            budget_exhausted: false,
        };
    }

    warn!(
        nodes = search.nodes,
        budget_exhausted = search.exhausted,
        "no complete timetable found, falling back to greedy"
    );
    BacktrackOutcome {
        assignments: solve_greedy(problem),
        nodes: search.nodes,
        fell_back: true,
        budget_exhausted: search.exhausted,
    }
}

struct Search<'p, 'a> {
    problem: &'p Problem<'a>,
    ledger: ScheduleLedger,
    placed: Vec<Assignment>,
    nodes: u64,
    limit: Option<u64>,
    exhausted: bool,
}

/// Search state for one course: the next (slot, room) cell to try and the
/// placement currently committed for it.
struct Frame {
    next: usize,
    placement: Option<Placement>,
}

impl Search<'_, '_> {
    /// Depth-first over courses in input order. The stack holds one frame per
    /// course placed so far, so depth is bounded by the heap, not the thread.
    fn run(&mut self) -> bool {
        let problem = self.problem;
        let courses = problem.courses;
        let rooms = problem.rooms;
        let cells = problem.slots.len() * rooms.len();
        if courses.is_empty() {
            return true;
        }

        let mut stack: Vec<Frame> = Vec::with_capacity(courses.len());
        stack.push(Frame {
            next: 0,
            placement: None,
        });

        while let Some(depth) = stack.len().checked_sub(1) {
            let course = &courses[depth];
            let frame = &mut stack[depth];
            if let Some(prev) = frame.placement.take() {
                self.ledger.undo(&prev);
                self.placed.pop();
            }

            let mut found = None;
            while frame.next < cells {
                let cell = frame.next;
                frame.next += 1;
                let slot = &problem.slots[cell / rooms.len()];
                let room = &rooms[cell % rooms.len()];
                if room.capacity < course.students
                    || !self
                        .ledger
                        .is_free(&slot.day, &slot.time, &room.id, &course.teacher)
                {
                    continue;
                }
                if self.limit.is_some_and(|l| self.nodes >= l) {
                    self.exhausted = true;
                    return false;
                }
                self.nodes += 1;
                found = Some((slot, room));
                break;
            }

            let Some((slot, room)) = found else {
                stack.pop();
                continue;
            };
            let placement = Placement {
                day: slot.day.clone(),
                time: slot.time.clone(),
                room: room.id.clone(),
                teacher: course.teacher.clone(),
            };
            let score = assignment_score(course, room, slot, problem.weights());
            self.ledger.commit(&placement);
            self.placed
                .push(Assignment::placed(course, room, slot, Some(score)));
            frame.placement = Some(placement);

            if stack.len() == courses.len() {
                return true;
            }
            stack.push(Frame {
                next: 0,
                placement: None,
            });
        }
        false
    }
}
