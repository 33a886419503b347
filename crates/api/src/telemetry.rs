use std::time::Duration;
use tower::layer::util::{Identity, Stack};
use tower::ServiceBuilder;
use tower_http::trace::HttpMakeClassifier;
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

/// The request timeout answers 408; a blocking solve already started keeps
/// running until it finishes, bounded by the work caps in validation.
pub fn stack(
    body_limit: usize,
    timeout: Duration,
) -> ServiceBuilder<
    Stack<
        TimeoutLayer,
        Stack<
            RequestBodyLimitLayer,
            Stack<CorsLayer, Stack<TraceLayer<HttpMakeClassifier>, Identity>>,
        >,
    >,
> {
    ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TimeoutLayer::new(timeout))
}
