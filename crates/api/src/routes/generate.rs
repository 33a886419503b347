use axum::Json;
use sched_core::validate;
use tracing::info;
use types::{TimetableRequest, TimetableResult};

use crate::error::ApiError;

#[utoipa::path(
    post,
    path = "/v1/generate",
    request_body = TimetableRequest,
    responses(
        (status = 200, description = "Timetable produced by the requested algorithm", body = TimetableResult),
        (status = 400, description = "Malformed request")
    )
)]
pub async fn generate(Json(req): Json<TimetableRequest>) -> Result<Json<TimetableResult>, ApiError> {
    validate(&req)?;
    info!(
        algorithm = %req.options.algorithm,
        courses = req.courses.len(),
        rooms = req.rooms.len(),
        "generate"
    );
    let result = tokio::task::spawn_blocking(move || solver_heur::solve_request(&req))
        .await
        .map_err(ApiError::internal)?;
    Ok(Json(result))
}
