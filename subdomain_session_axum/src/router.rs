//! Router for the session sharing endpoints

use axum::{Router, routing::get};
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::handlers::{index, login};
use super::state::AppState;

/// Create the router serving `GET /login` and `GET /`
///
/// Requests are traced at INFO level with latency in milliseconds. Request
/// headers are left out of the spans since they carry session ids.
pub fn session_share_router(state: AppState) -> Router {
    session_share_router_no_trace(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as [`session_share_router`] without the HTTP tracing middleware.
pub fn session_share_router_no_trace(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/login", get(login))
        .with_state(state)
}
