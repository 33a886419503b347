use rand::seq::SliceRandom;
use rand::Rng;
use sched_core::index::OccupancyIndex;
use sched_core::{Assignment, Course, Problem, Room, TimeSlot};

fn fits(occ: &OccupancyIndex, course: &Course, slot: &TimeSlot, room: &Room) -> bool {
    room.capacity >= course.students && !occ.is_taken(&slot.day, &slot.time, &room.id)
}

/// Random-order, random-choice construction. Courses with no open slot are
/// left out of the individual rather than flagged, and teachers are not
/// checked. Placements carry no score.
pub fn random_solution<R: Rng + ?Sized>(problem: &Problem<'_>, rng: &mut R) -> Vec<Assignment> {
    let mut order: Vec<&Course> = problem.courses.iter().collect();
    order.shuffle(rng);

    let mut occ = OccupancyIndex::default();
    let mut assignments = Vec::with_capacity(order.len());

    for course in order {
        let open: Vec<&TimeSlot> = problem
            .slots
            .iter()
            .filter(|s| problem.rooms.iter().any(|r| fits(&occ, course, s, r)))
            .collect();
        let Some(&slot) = open.choose(rng) else {
            continue;
        };

        let rooms: Vec<&Room> = problem
            .rooms
            .iter()
            .filter(|r| fits(&occ, course, slot, r))
            .collect();
        let Some(&room) = rooms.choose(rng) else {
            continue;
        };

        occ.occupy(&slot.day, &slot.time, &room.id);
        assignments.push(Assignment::placed(course, room, slot, None));
    }
    assignments
}
