use serde::Serialize;
use std::collections::HashSet;
use types::{Assignment, Course, PriorityWeights, Room, TimeSlot};

pub const BASE_SCORE: f64 = 100.0;
pub const PLACEMENT_REWARD: f64 = 10.0;
pub const DOUBLE_BOOKING_PENALTY: f64 = 50.0;

const DEFAULT_ROOM_TYPES: &[&str] = &["Classroom"];

/// Processing priority: larger classes, courses with time preferences and
/// manually weighted courses go first.
pub fn course_priority(course: &Course) -> f64 {
    let mut score = course.students as f64 * 0.5;
    if !course.preferred_slots.is_empty() {
        score += 20.0;
    }
    if let Some(p) = course.priority {
        score += p * 10.0;
    }
    score
}

pub fn preferred_room_types(category: &str) -> &'static [&'static str] {
    match category {
        "Computer Science" => &["Computer Lab", "Laboratory"],
        "Engineering" => &["Laboratory", "Engineering Lab"],
        "Sciences" => &["Laboratory", "Science Lab"],
        "Business" => &["Classroom", "Seminar Room"],
        "Mathematics" => &["Classroom", "Lecture Hall"],
        "Liberal Arts" => &["Classroom", "Seminar Room"],
        _ => DEFAULT_ROOM_TYPES,
    }
}

pub fn is_room_type_match(course: &Course, room: &Room) -> bool {
    preferred_room_types(&course.category).contains(&room.room_type.as_str())
}

/// Additive components of an assignment's quality score.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub base: f64,
    pub capacity: f64,
    pub room_type: f64,
    pub time_preference: f64,
    pub day_preference: f64,
    pub total: f64,
}

pub fn score_breakdown(
    course: &Course,
    room: &Room,
    day: &str,
    time: &str,
    weights: &PriorityWeights,
) -> ScoreBreakdown {
    let mut b = ScoreBreakdown {
        base: BASE_SCORE,
        ..Default::default()
    };

    let ratio = course.students as f64 / room.capacity as f64;
    if ratio > 0.7 && ratio <= 1.0 {
        b.capacity = weights.room_capacity;
    } else if ratio > 1.0 {
        // Solvers never produce this; explained external timetables can.
        b.capacity = -weights.room_capacity * 2.0;
    }

    if is_room_type_match(course, room) {
        b.room_type = weights.room_type;
    }
    if course.preferred_slots.iter().any(|t| t == time) {
        b.time_preference = weights.time_preference;
    }
    if course.preferred_days.iter().any(|d| d == day) {
        b.day_preference = weights.time_preference;
    }

    b.total = b.base + b.capacity + b.room_type + b.time_preference + b.day_preference;
    b
}

pub fn assignment_score(
    course: &Course,
    room: &Room,
    slot: &TimeSlot,
    weights: &PriorityWeights,
) -> f64 {
    score_breakdown(course, room, &slot.day, &slot.time, weights).total
}

/// Genetic fitness: each placed assignment earns its stored score plus a
/// reward, or a penalty when its (day, time, room) was already counted.
pub fn solution_fitness(solution: &[Assignment]) -> f64 {
    let mut fitness = 0.0;
    let mut seen: HashSet<(&str, &str, &str)> = HashSet::new();
    for a in solution {
        let Some((day, time, room)) = a.placement() else {
            continue;
        };
        if seen.insert((day, time, room.0.as_str())) {
            fitness += PLACEMENT_REWARD;
        } else {
            fitness -= DOUBLE_BOOKING_PENALTY;
        }
        fitness += a.score.unwrap_or(0.0);
    }
    fitness
}

pub fn count_double_bookings(solution: &[Assignment]) -> usize {
    let mut seen: HashSet<(&str, &str, &str)> = HashSet::new();
    solution
        .iter()
        .filter_map(|a| a.placement())
        .filter(|(d, t, r)| !seen.insert((*d, *t, r.0.as_str())))
        .count()
}
