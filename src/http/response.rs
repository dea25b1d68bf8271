//! JSON response helpers shared by every handler.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Respond with `{"error": message}` and the given status.
pub fn error_response(code: StatusCode, message: impl Into<String>) -> Response {
    json_response(
        code,
        &ErrorBody {
            error: message.into(),
        },
    )
}

/// Respond with an arbitrary serializable payload and the given status.
pub fn json_response<T: Serialize>(code: StatusCode, payload: &T) -> Response {
    (code, Json(payload)).into_response()
}
