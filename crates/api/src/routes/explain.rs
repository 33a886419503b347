use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use sched_core::scoring::{count_double_bookings, score_breakdown, solution_fitness};
use types::{Assignment, CourseId, RoomId, TimetableRequest};

#[derive(Deserialize, ToSchema)]
pub struct ExplainIn {
    pub request: TimetableRequest,
    pub assignments: Vec<Assignment>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExplainOut {
    pub fitness: f64,
    pub double_bookings: usize,
    pub placed: usize,
    pub unscheduled: usize,
    pub items: Vec<ExplainItem>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExplainItem {
    pub course_id: CourseId,
    pub room_id: RoomId,
    pub day: String,
    pub slot: String,
    pub base: f64,
    pub capacity: f64,
    pub room_type: f64,
    pub time_preference: f64,
    pub day_preference: f64,
    pub total: f64,
}

#[utoipa::path(
    post,
    path = "/v1/explain",
    request_body = ExplainIn,
    responses(
        (status = 200, description = "Score breakdown for the provided timetable", body = ExplainOut)
    )
)]
pub async fn explain(Json(input): Json<ExplainIn>) -> Json<ExplainOut> {
    Json(explain_timetable(&input.request, &input.assignments))
}

/// Placed assignments that reference an unknown course or room are skipped
/// in `items` but still count toward fitness.
pub fn explain_timetable(req: &TimetableRequest, assignments: &[Assignment]) -> ExplainOut {
    let weights = &req.options.priorities;
    let mut items = Vec::new();
    let mut placed = 0;

    for a in assignments {
        let Some((day, time, room_id)) = a.placement() else {
            continue;
        };
        placed += 1;
        let course = req.courses.iter().find(|c| c.id == a.course_id);
        let room = req.rooms.iter().find(|r| &r.id == room_id);
        let (Some(course), Some(room)) = (course, room) else {
            continue;
        };
        let b = score_breakdown(course, room, day, time, weights);
        items.push(ExplainItem {
            course_id: a.course_id.clone(),
            room_id: room_id.clone(),
            day: day.to_string(),
            slot: time.to_string(),
            base: b.base,
            capacity: b.capacity,
            room_type: b.room_type,
            time_preference: b.time_preference,
            day_preference: b.day_preference,
            total: b.total,
        });
    }

    ExplainOut {
        fitness: solution_fitness(assignments),
        double_bookings: count_double_bookings(assignments),
        placed,
        unscheduled: assignments.len() - placed,
        items,
    }
}
