use axum::Json;
use sched_core::{unschedulable_courses, validate, ValidationError};
use serde::Serialize;
use types::TimetableRequest;

#[derive(Serialize, utoipa::ToSchema)]
pub struct ValidationReport {
    pub ok: bool,
    pub errors: Vec<String>,
    /// Problems the engine tolerates but reports as conflicts.
    pub warnings: Vec<String>,
}

#[utoipa::path(
    post,
    path = "/v1/validate",
    request_body = TimetableRequest,
    responses(
        (status = 200, description = "Validation result", body = ValidationReport)
    )
)]
pub async fn validate_handler(Json(req): Json<TimetableRequest>) -> Json<ValidationReport> {
    let errors: Vec<String> = match validate(&req) {
        Ok(()) => vec![],
        Err(ValidationError::Invalid(errors)) => errors,
    };
    let warnings = unschedulable_courses(&req)
        .into_iter()
        .map(|id| format!("course {id} fits no room and will be reported as a conflict"))
        .collect();
    Json(ValidationReport {
        ok: errors.is_empty(),
        errors,
        warnings,
    })
}
