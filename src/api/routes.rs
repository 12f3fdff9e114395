use std::any::Any;

use axum::{
    extract::DefaultBodyLimit,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::{error, Level};

use crate::error::ApiError;

use super::handlers;

pub fn router() -> Router {
    with_layers(
        Router::new()
            // axum answers HEAD with the GET handler unless told otherwise
            .route(
                "/health",
                get(handlers::health_check).head(handlers::not_found),
            )
            .route("/url/encode", post(handlers::encode_url))
            .route("/url/decode", post(handlers::decode_url))
            .fallback(handlers::not_found)
            .method_not_allowed_fallback(handlers::not_found),
    )
}

// tracing outermost, then the per-request panic boundary; bodies are uncapped
fn with_layers(routes: Router) -> Router {
    routes.layer(
        ServiceBuilder::new()
            .layer(DefaultBodyLimit::disable())
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(
                        DefaultOnResponse::new()
                            .latency_unit(LatencyUnit::Millis)
                            .level(Level::DEBUG),
                    )
                    .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
            )
            .layer(CatchPanicLayer::custom(handle_panic)),
    )
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    error!(panic = %detail, "Handler panicked");
    ApiError::Internal.into_response()
}
