use rand::Rng;
use sched_core::index::OccupancyIndex;
use sched_core::{Assignment, Problem};

use super::Individual;
use crate::greedy::find_best_slot;

pub const TOURNAMENT_SIZE: usize = 3;

/// Fittest of `TOURNAMENT_SIZE` uniformly drawn contestants; the earliest
/// draw wins ties.
pub fn tournament<'a, R: Rng + ?Sized>(population: &'a [Individual], rng: &mut R) -> &'a Individual {
    let mut best = &population[rng.gen_range(0..population.len())];
    for _ in 1..TOURNAMENT_SIZE {
        let contestant = &population[rng.gen_range(0..population.len())];
        if contestant.fitness > best.fitness {
            best = contestant;
        }
    }
    best
}

/// Single-point crossover at the midpoint of the first parent.
pub fn crossover(first: &[Assignment], second: &[Assignment]) -> Vec<Assignment> {
    let point = first.len() / 2;
    first[..point]
        .iter()
        .chain(second.iter().skip(point))
        .cloned()
        .collect()
}

/// Re-places one random position with the best-slot search against the
/// rooms held by every other position. Teacher schedules are not rebuilt,
/// so the new placement may clash with the same teacher elsewhere.
///
/// Returns whether the position was replaced.
pub fn mutate<R: Rng + ?Sized>(
    problem: &Problem<'_>,
    solution: &mut [Assignment],
    rng: &mut R,
) -> bool {
    if solution.is_empty() {
        return false;
    }
    let pick = rng.gen_range(0..solution.len());
    let Some(course) = problem.course(&solution[pick].course_id) else {
        return false;
    };

    let mut occ = OccupancyIndex::default();
    for (i, a) in solution.iter().enumerate() {
        if i == pick {
            continue;
        }
        if let Some((day, time, room)) = a.placement() {
            occ.occupy(day, time, room);
        }
    }

    match find_best_slot(problem, course, &occ, None) {
        Some(best) => {
            solution[pick] = best.into_assignment(course);
            true
        }
        None => false,
    }
}
