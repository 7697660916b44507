//! # REST API Interface Layer
//!
//! JSON endpoints under `/api`, grouped by concern:
//!
//! - **simulation_apis**: ad-hoc simulations, the merged dataset, scenarios
//! - **override_apis**: reading and editing what-if overrides
//!
//! Each group exposes a `router()` that `create_router` merges under `/api`.

pub mod override_apis;
pub mod simulation_apis;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

/// Log a failed request and return its message with a 500 status
pub(crate) fn internal_error(context: &str, error: impl std::fmt::Display) -> Response {
    error!("{}: {}", context, error);
    (StatusCode::INTERNAL_SERVER_ERROR, format!("{}: {}", context, error)).into_response()
}

/// Log a rejected request and return its message with a 400 status
pub(crate) fn bad_request(error: impl std::fmt::Display) -> Response {
    error!("Rejected request: {}", error);
    (StatusCode::BAD_REQUEST, error.to_string()).into_response()
}
