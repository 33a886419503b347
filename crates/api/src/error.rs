use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug)]
pub struct ApiError(pub StatusCode, pub String);

impl ApiError {
    pub fn bad_request(msg: impl ToString) -> Self {
        Self(StatusCode::BAD_REQUEST, msg.to_string())
    }

    pub fn not_found(msg: impl ToString) -> Self {
        Self(StatusCode::NOT_FOUND, msg.to_string())
    }

    pub fn internal(msg: impl ToString) -> Self {
        Self(StatusCode::INTERNAL_SERVER_ERROR, msg.to_string())
    }
}

impl From<sched_core::ValidationError> for ApiError {
    fn from(e: sched_core::ValidationError) -> Self {
        Self::bad_request(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}
