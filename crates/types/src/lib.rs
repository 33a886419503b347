use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq, Hash, Ord,
            PartialOrd,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}
id_newtype!(CourseId);
id_newtype!(RoomId);
id_newtype!(TeacherId);

/// Label used for the room of an assignment that could not be placed.
pub const UNASSIGNED_ROOM: &str = "Unassigned";

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    /// Subject area; drives room-type affinity.
    pub category: String,
    pub teacher: TeacherId,
    pub students: u32,
    pub duration: u32,
    /// Preferred time labels. When non-empty the course is only placed in these.
    #[serde(default)]
    pub preferred_slots: Vec<String>,
    #[serde(default)]
    pub preferred_days: Vec<String>,
    #[serde(default)]
    pub priority: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub capacity: u32,
    #[serde(rename = "type")]
    pub room_type: String,
    #[serde(default)]
    pub equipment: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub day: String,
    pub time: String,
    pub index: usize,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum UnscheduledReason {
    NoTimeSlots,
    InsufficientCapacity,
    RoomsOccupied,
    TeacherConflict,
}

impl fmt::Display for UnscheduledReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnscheduledReason::NoTimeSlots => "no candidate time slot",
            UnscheduledReason::InsufficientCapacity => "no room is large enough",
            UnscheduledReason::RoomsOccupied => "every suitable room is occupied",
            UnscheduledReason::TeacherConflict => "teacher is busy in every free slot",
        };
        f.write_str(s)
    }
}

/// One course bound to a room and a slot, or flagged as a conflict when no
/// placement exists.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub course_id: CourseId,
    pub course_name: String,
    pub category: String,
    pub teacher: TeacherId,
    pub room_id: Option<RoomId>,
    pub room_name: String,
    pub day: Option<String>,
    pub slot: Option<String>,
    pub students: u32,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub conflict: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<UnscheduledReason>,
}

impl Assignment {
    pub fn placed(course: &Course, room: &Room, slot: &TimeSlot, score: Option<f64>) -> Self {
        Self {
            course_id: course.id.clone(),
            course_name: course.name.clone(),
            category: course.category.clone(),
            teacher: course.teacher.clone(),
            room_id: Some(room.id.clone()),
            room_name: room.name.clone(),
            day: Some(slot.day.clone()),
            slot: Some(slot.time.clone()),
            students: course.students,
            conflict: false,
            score,
            reason: None,
        }
    }

    pub fn unscheduled(course: &Course, reason: UnscheduledReason) -> Self {
        Self {
            course_id: course.id.clone(),
            course_name: course.name.clone(),
            category: course.category.clone(),
            teacher: course.teacher.clone(),
            room_id: None,
            room_name: UNASSIGNED_ROOM.to_string(),
            day: None,
            slot: None,
            students: course.students,
            conflict: true,
            score: Some(0.0),
            reason: Some(reason),
        }
    }

    /// The (day, time, room) triple when the assignment is fully bound.
    pub fn placement(&self) -> Option<(&str, &str, &RoomId)> {
        match (&self.day, &self.slot, &self.room_id) {
            (Some(d), Some(t), Some(r)) => Some((d.as_str(), t.as_str(), r)),
            _ => None,
        }
    }

    pub fn is_placed(&self) -> bool {
        self.placement().is_some()
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Default, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Greedy,
    Genetic,
    Backtrack,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Algorithm::Greedy => "greedy",
            Algorithm::Genetic => "genetic",
            Algorithm::Backtrack => "backtrack",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriorityWeights {
    #[serde(default = "default_room_capacity")]
    pub room_capacity: f64,
    /// Declared for interface compatibility; not applied by the scoring model.
    #[serde(default = "default_teacher_conflict")]
    pub teacher_conflict: f64,
    #[serde(default = "default_time_preference")]
    pub time_preference: f64,
    #[serde(default = "default_room_type")]
    pub room_type: f64,
}

fn default_room_capacity() -> f64 {
    10.0
}
fn default_teacher_conflict() -> f64 {
    15.0
}
fn default_time_preference() -> f64 {
    5.0
}
fn default_room_type() -> f64 {
    3.0
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            room_capacity: default_room_capacity(),
            teacher_conflict: default_teacher_conflict(),
            time_preference: default_time_preference(),
            room_type: default_room_type(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerOptions {
    #[serde(default)]
    pub algorithm: Algorithm,
    /// Generation count of the genetic solver.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    #[serde(default)]
    pub priorities: PriorityWeights,
    #[serde(default)]
    pub seed: Option<u64>,
    /// Search nodes the backtracking solver may expand before falling back
    /// to greedy. `None` searches without bound.
    #[serde(default = "default_backtrack_node_limit")]
    pub backtrack_node_limit: Option<u64>,
}

fn default_max_iterations() -> u32 {
    1000
}
fn default_population_size() -> usize {
    50
}
fn default_mutation_rate() -> f64 {
    0.1
}
fn default_backtrack_node_limit() -> Option<u64> {
    Some(100_000)
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            max_iterations: default_max_iterations(),
            population_size: default_population_size(),
            mutation_rate: default_mutation_rate(),
            priorities: PriorityWeights::default(),
            seed: None,
            backtrack_node_limit: default_backtrack_node_limit(),
        }
    }
}

impl SchedulerOptions {
    pub fn with_algorithm(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimetableRequest {
    pub courses: Vec<Course>,
    pub rooms: Vec<Room>,
    pub days: Vec<String>,
    pub times: Vec<String>,
    #[serde(default)]
    pub options: SchedulerOptions,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct TimetableResult {
    pub status: String,
    pub algorithm: Algorithm,
    pub fitness: f64,
    pub assignments: Vec<Assignment>,
    pub stats: serde_json::Value,
}

/// Re-sorts assignments by course identifier for callers that need an order
/// independent of the solver's processing order.
pub fn sort_by_course_id(assignments: &mut [Assignment]) {
    assignments.sort_by(|a, b| a.course_id.cmp(&b.course_id));
}
