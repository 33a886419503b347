//! Population search over whole timetables.
//!
//! Each generation keeps the top fifth unchanged and breeds the rest by
//! tournament selection, midpoint crossover and occasional mutation. The run
//! length is fixed by `maxIterations`; quality depends on the random source,
//! which callers may seed through `SchedulerOptions::seed`.

pub mod construct;
pub mod operators;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sched_core::scoring::solution_fitness;
use sched_core::{Assignment, Problem, SchedulerOptions, Solver};
use tracing::{debug, info, warn};

use construct::random_solution;
use operators::{crossover, mutate, tournament};

pub const ELITE_FRACTION: f64 = 0.2;

#[derive(Clone, Debug)]
pub struct Individual {
    pub assignments: Vec<Assignment>,
    pub fitness: f64,
}

impl Individual {
    pub fn new(assignments: Vec<Assignment>) -> Self {
        let fitness = solution_fitness(&assignments);
        Self {
            assignments,
            fitness,
        }
    }
}

/// Seeded when the options carry a seed, entropy-seeded otherwise.
pub fn rng_for(options: &SchedulerOptions) -> ChaCha8Rng {
    match options.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GeneticSolver;

impl GeneticSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Solver for GeneticSolver {
    fn solve(&self, problem: &Problem<'_>) -> Vec<Assignment> {
        let mut rng = rng_for(problem.options);
        solve_genetic(problem, &mut rng).assignments
    }
}

pub fn solve_genetic<R: Rng + ?Sized>(problem: &Problem<'_>, rng: &mut R) -> Individual {
    let opts = problem.options;
    info!(
        courses = problem.courses.len(),
        population = opts.population_size,
        generations = opts.max_iterations,
        mutation_rate = opts.mutation_rate,
        "genetic solve"
    );

    let mut population: Vec<Individual> = (0..opts.population_size)
        .map(|_| Individual::new(random_solution(problem, rng)))
        .collect();
    if population.is_empty() {
        warn!("population size is zero, nothing to evolve");
        return Individual::new(Vec::new());
    }

    for generation in 0..opts.max_iterations {
        population = evolve(problem, population, rng);
        if generation % 100 == 0 {
            debug!(
                generation,
                best = best_fitness(&population),
                "generation evolved"
            );
        }
    }

    let best = fittest(population);
    info!(
        fitness = best.fitness,
        placed = best.assignments.iter().filter(|a| a.is_placed()).count(),
        "genetic solve finished"
    );
    best
}

/// One generation: elites carried over, the remainder bred from the
/// current population.
pub fn evolve<R: Rng + ?Sized>(
    problem: &Problem<'_>,
    mut population: Vec<Individual>,
    rng: &mut R,
) -> Vec<Individual> {
    let size = problem.options.population_size;
    population.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

    let elite = (size as f64 * ELITE_FRACTION) as usize;
    let mut next: Vec<Individual> = population.iter().take(elite).cloned().collect();

    while next.len() < size {
        let first = tournament(&population, rng);
        let second = tournament(&population, rng);
        let mut child = crossover(&first.assignments, &second.assignments);
        if rng.gen::<f64>() < problem.options.mutation_rate {
            mutate(problem, &mut child, rng);
        }
        next.push(Individual::new(child));
    }
    next
}

/// Highest fitness, earliest member on ties.
/// Highest fitness in the population. Bred children follow the elites, so
/// no position is guaranteed to hold the best.
fn best_fitness(population: &[Individual]) -> f64 {
    population
        .iter()
        .map(|i| i.fitness)
        .fold(f64::NEG_INFINITY, f64::max)
}

fn fittest(population: Vec<Individual>) -> Individual {
    let mut iter = population.into_iter();
    let Some(mut best) = iter.next() else {
        return Individual::new(Vec::new());
    };
    for candidate in iter {
        if candidate.fitness > best.fitness {
            best = candidate;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use sched_core::{Algorithm, Course, Room};

    fn course(id: &str, teacher: &str, students: u32) -> Course {
        Course {
            id: id.into(),
            name: id.into(),
            category: "Computer Science".into(),
            teacher: teacher.into(),
            students,
            duration: 1,
            preferred_slots: vec![],
            preferred_days: vec![],
            priority: None,
        }
    }

    fn room(id: &str, capacity: u32, room_type: &str) -> Room {
        Room {
            id: id.into(),
            name: id.into(),
            capacity,
            room_type: room_type.into(),
            equipment: vec![],
        }
    }

    fn options(population: usize, generations: u32) -> SchedulerOptions {
        SchedulerOptions {
            algorithm: Algorithm::Genetic,
            population_size: population,
            max_iterations: generations,
            mutation_rate: 0.3,
            ..SchedulerOptions::default()
        }
    }

    #[test]
    fn evolve_keeps_population_size_and_elites() {
        let courses: Vec<Course> = (0..5).map(|i| course(&format!("c{i}"), &format!("t{i}"), 20)).collect();
        let rooms = vec![room("lab", 25, "Computer Lab"), room("cr", 40, "Classroom")];
        let opts = options(10, 1);
        let problem = Problem::new(&courses, &rooms, &["Mon", "Tue"], &["09:00", "11:00"], &opts);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let population: Vec<Individual> = (0..10)
            .map(|_| Individual::new(random_solution(&problem, &mut rng)))
            .collect();
        let best_before = population
            .iter()
            .map(|i| i.fitness)
            .fold(f64::MIN, f64::max);

        let next = evolve(&problem, population, &mut rng);
        assert_eq!(next.len(), 10);
        assert_eq!(next[0].fitness, best_before);
        assert!(next.iter().all(|i| i.fitness == solution_fitness(&i.assignments)));
    }

    #[test]
    fn best_fitness_never_drops_across_generations() {
        let courses: Vec<Course> = (0..6).map(|i| course(&format!("c{i}"), "t1", 20)).collect();
        let rooms = vec![room("lab", 25, "Computer Lab"), room("cr", 40, "Classroom")];
        let opts = options(12, 1);
        let problem = Problem::new(&courses, &rooms, &["Mon", "Tue"], &["09:00", "11:00"], &opts);
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let mut population: Vec<Individual> = (0..12)
            .map(|_| Individual::new(random_solution(&problem, &mut rng)))
            .collect();
        let mut best = f64::MIN;
        for _ in 0..25 {
            population = evolve(&problem, population, &mut rng);
            let now = population.iter().map(|i| i.fitness).fold(f64::MIN, f64::max);
            assert!(now >= best);
            best = now;
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let courses: Vec<Course> = (0..4).map(|i| course(&format!("c{i}"), &format!("t{i}"), 15)).collect();
        let rooms = vec![room("lab", 20, "Laboratory"), room("cr", 30, "Classroom")];
        let opts = SchedulerOptions {
            seed: Some(1234),
            ..options(8, 15)
        };
        let problem = Problem::new(&courses, &rooms, &["Mon"], &["09:00", "10:00"], &opts);

        let a = GeneticSolver::new().solve(&problem);
        let b = GeneticSolver::new().solve(&problem);
        assert_eq!(a, b);
    }

    #[test]
    fn roomy_instance_keeps_every_course_and_beats_random_baseline() {
        let courses: Vec<Course> = (0..4).map(|i| course(&format!("c{i}"), &format!("t{i}"), 15)).collect();
        let rooms = vec![room("lab", 20, "Computer Lab"), room("cr", 30, "Classroom")];
        let opts = options(10, 30);
        let problem = Problem::new(&courses, &rooms, &["Mon", "Tue"], &["09:00", "10:00"], &opts);
        let mut rng = ChaCha8Rng::seed_from_u64(77);

        let best = solve_genetic(&problem, &mut rng);
        assert_eq!(best.assignments.len(), 4);
        // Every random individual places all four courses cleanly: 4 x 10.
        assert!(best.fitness >= 40.0);
        assert_eq!(best.fitness, solution_fitness(&best.assignments));
    }

    #[test]
    fn zero_population_returns_empty_individual() {
        let courses = vec![course("c0", "t0", 10)];
        let rooms = vec![room("cr", 30, "Classroom")];
        let opts = options(0, 10);
        let problem = Problem::new(&courses, &rooms, &["Mon"], &["09:00"], &opts);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let best = solve_genetic(&problem, &mut rng);
        assert!(best.assignments.is_empty());
    }

    #[test]
    fn best_fitness_scans_the_whole_population() {
        let population: Vec<Individual> = [12.0, 40.0, -5.0]
            .into_iter()
            .map(|fitness| Individual {
                assignments: vec![],
                fitness,
            })
            .collect();
        assert_eq!(best_fitness(&population), 40.0);
        assert_eq!(best_fitness(&[]), f64::NEG_INFINITY);
    }
}
