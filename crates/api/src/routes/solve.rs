use crate::{error::ApiError, state::AppState};
use axum::{extract::State, Json};
use sched_core::validate;
use types::TimetableRequest;
use utoipa::ToSchema;

#[derive(serde::Serialize, ToSchema)]
pub struct JobCreated {
    #[serde(rename = "jobId")]
    pub job_id: String,
    pub status: &'static str,
}

#[utoipa::path(
    post,
    path = "/v1/solve",
    request_body = TimetableRequest,
    responses(
        (status = 200, description = "Job enqueued", body = JobCreated),
        (status = 400, description = "Malformed request")
    )
)]
pub async fn solve(
    State(state): State<AppState>,
    Json(req): Json<TimetableRequest>,
) -> Result<Json<JobCreated>, ApiError> {
    validate(&req)?;
    let id = state.jobs.enqueue(req);
    Ok(Json(JobCreated {
        job_id: id.0,
        status: "queued",
    }))
}
