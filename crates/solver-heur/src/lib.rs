pub mod backtrack;
pub mod genetic;
pub mod greedy;

use rand::Rng;
use sched_core::scoring::{count_double_bookings, solution_fitness};
use sched_core::{
    Algorithm, Assignment, Course, Problem, Room, SchedulerOptions, Solver, TimetableRequest,
    TimetableResult,
};
use std::collections::HashSet;
use tracing::info;

pub use backtrack::{solve_backtracking, BacktrackOutcome, BacktrackSolver};
pub use genetic::{solve_genetic, GeneticSolver};
pub use greedy::{solve_greedy, GreedySolver};

/// Dispatches to the solver named by `options.algorithm`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Engine;

impl Engine {
    pub fn new() -> Self {
        Self
    }

    pub fn run(&self, problem: &Problem<'_>) -> TimetableResult {
        let mut rng = genetic::rng_for(problem.options);
        self.run_with_rng(problem, &mut rng)
    }

    /// Like [`Engine::run`] with a caller-supplied random source for the
    /// genetic solver.
    pub fn run_with_rng<R: Rng + ?Sized>(&self, problem: &Problem<'_>, rng: &mut R) -> TimetableResult {
        let algorithm = problem.options.algorithm;
        let (assignments, mut stats) = match algorithm {
            Algorithm::Greedy => (solve_greedy(problem), serde_json::json!({"method": "greedy"})),
            Algorithm::Backtrack => {
                let out = solve_backtracking(problem);
                let stats = serde_json::json!({
                    "method": "backtrack",
                    "nodes": out.nodes,
                    "fallback": out.fell_back,
                    "budgetExhausted": out.budget_exhausted,
                });
                (out.assignments, stats)
            }
            Algorithm::Genetic => {
                let best = solve_genetic(problem, rng);
                let stats = serde_json::json!({
                    "method": "genetic",
                    "populationSize": problem.options.population_size,
                    "generations": problem.options.max_iterations,
                    "mutationRate": problem.options.mutation_rate,
                });
                (best.assignments, stats)
            }
        };

        let scheduled: HashSet<&str> = assignments
            .iter()
            .filter(|a| a.is_placed())
            .map(|a| a.course_id.0.as_str())
            .collect();
        let scheduled = scheduled.len();
        let conflicts = assignments.iter().filter(|a| a.conflict).count();
        let double_bookings = count_double_bookings(&assignments);
        let status = if scheduled == problem.courses.len() && double_bookings == 0 {
            "solved"
        } else {
            "partial"
        };

        stats["courses"] = serde_json::json!(problem.courses.len());
        stats["rooms"] = serde_json::json!(problem.rooms.len());
        stats["timeslots"] = serde_json::json!(problem.slots.len());
        stats["scheduled"] = serde_json::json!(scheduled);
        stats["conflicts"] = serde_json::json!(conflicts);
        stats["doubleBookings"] = serde_json::json!(double_bookings);

        info!(%algorithm, status, scheduled, conflicts, "timetable generated");
        TimetableResult {
            status: status.into(),
            algorithm,
            fitness: solution_fitness(&assignments),
            assignments,
            stats,
        }
    }
}

impl Solver for Engine {
    fn solve(&self, problem: &Problem<'_>) -> Vec<Assignment> {
        self.run(problem).assignments
    }
}

pub fn solve_request(req: &TimetableRequest) -> TimetableResult {
    Engine::new().run(&Problem::from_request(req))
}

/// Builds the slot grid once and returns the chosen solver's assignments,
/// in that solver's processing order.
pub fn generate_optimal_timetable<D: AsRef<str>, T: AsRef<str>>(
    courses: &[Course],
    rooms: &[Room],
    days: &[D],
    times: &[T],
    options: &SchedulerOptions,
) -> Vec<Assignment> {
    let problem = Problem::new(courses, rooms, days, times, options);
    Engine::new().solve(&problem)
}
