mod config;
mod error;
mod state;
mod telemetry;
pub mod routes {
    pub mod explain;
    pub mod generate;
    pub mod health;
    pub mod jobs;
    pub mod solve;
    pub mod validate;
}

use axum::{
    routing::{get, post},
    Router,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::health,
        routes::generate::generate,
        routes::solve::solve,
        routes::jobs::status,
        routes::jobs::result,
        routes::validate::validate_handler,
        routes::explain::explain,
    ),
    components(schemas(
        types::Course, types::Room, types::TimeSlot, types::Assignment,
        types::UnscheduledReason, types::Algorithm, types::PriorityWeights,
        types::SchedulerOptions, types::TimetableRequest, types::TimetableResult,
        types::CourseId, types::RoomId, types::TeacherId,
        jobs::JobId, jobs::JobStatus,
        routes::validate::ValidationReport,
        routes::solve::JobCreated,
        routes::explain::ExplainIn,
        routes::explain::ExplainOut,
        routes::explain::ExplainItem
    )),
    tags(
        (name = "timetable", description = "Timetable generation API")
    )
)]
struct ApiDoc;

pub fn app(state: state::AppState, settings: &config::Settings) -> Router {
    Router::new()
        .route("/v1/health", get(routes::health::health))
        .route("/v1/generate", post(routes::generate::generate))
        .route("/v1/solve", post(routes::solve::solve))
        .route("/v1/validate", post(routes::validate::validate_handler))
        .route("/v1/explain", post(routes::explain::explain))
        .route("/v1/jobs/:id", get(routes::jobs::status))
        .route("/v1/jobs/:id/result", get(routes::jobs::result))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(telemetry::stack(settings.body_limit, settings.request_timeout))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let settings = config::Settings::from_env()?;
    let app = app(state::AppState::new(&settings), &settings);

    let addr = settings.addr();
    tracing::info!(
        %addr,
        body_limit = settings.body_limit,
        timeout_secs = settings.request_timeout.as_secs(),
        "listening"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
