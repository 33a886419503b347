use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use jobs::JobStatus;
use types::TimetableResult;

use crate::{error::ApiError, state::AppState};

#[utoipa::path(
    get,
    path = "/v1/jobs/{id}",
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job status", body = JobStatus),
        (status = 404, description = "Unknown job")
    )
)]
pub async fn status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JobStatus>, ApiError> {
    state
        .jobs
        .get(&id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("job {id} not found")))
}

#[utoipa::path(
    get,
    path = "/v1/jobs/{id}/result",
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Timetable of a finished job", body = TimetableResult),
        (status = 202, description = "Job still queued or running", body = JobStatus),
        (status = 404, description = "Unknown job"),
        (status = 500, description = "Job failed", body = JobStatus)
    )
)]
pub async fn result(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    match state.jobs.get(&id) {
        Some(JobStatus::Solved { result }) => Ok(Json(result).into_response()),
        Some(failed @ JobStatus::Failed { .. }) => {
            Ok((StatusCode::INTERNAL_SERVER_ERROR, Json(failed)).into_response())
        }
        Some(pending) => Ok((StatusCode::ACCEPTED, Json(pending)).into_response()),
        None => Err(ApiError::not_found(format!("job {id} not found"))),
    }
}
