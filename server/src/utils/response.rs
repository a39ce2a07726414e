use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
pub struct ApiErrorBody {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

/// Entities are returned bare, without an envelope.
pub fn success<T>(data: T) -> Response
where
    T: Serialize,
{
    (StatusCode::OK, Json(data)).into_response()
}

pub fn empty_success() -> Response {
    StatusCode::OK.into_response()
}

pub fn error(
    code: &str,
    message: impl Into<String>,
    detail: Option<Value>,
    status: StatusCode,
) -> Response {
    let body = ApiErrorBody {
        error: message.into(),
        code: code.to_string(),
        detail,
    };

    (status, Json(body)).into_response()
}
