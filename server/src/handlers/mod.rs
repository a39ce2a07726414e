use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::utils::error::AppError;
use crate::utils::response::{empty_success, success};

pub mod events;
pub mod responses;

pub use events::{create_event, get_event, get_event_group};
pub use responses::create_response;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "scheduler-api",
    };

    success(payload)
}

/// Answers a bare `OPTIONS` that the CORS layer did not already handle.
pub async fn preflight() -> Response {
    empty_success()
}

pub async fn method_not_allowed() -> Response {
    AppError::MethodNotAllowed.into_response()
}
