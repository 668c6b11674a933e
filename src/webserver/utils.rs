/// Shared response helpers for API routes
///
/// Admin and lookup routes use a uniform JSON envelope:
/// `{ "success": true, "data": ... }` or
/// `{ "success": false, "error": { "code", "message" } }`.
///
/// The search route does NOT use these helpers: its contract is the stable
/// search response shape on every path, including failures.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(json!({ "success": true, "data": data }))).into_response()
}

pub fn error_response(
    status: StatusCode,
    code: &str,
    message: &str,
    details: Option<serde_json::Value>,
) -> Response {
    let mut body = json!({
        "success": false,
        "error": {
            "code": code,
            "message": message,
        }
    });
    if let Some(details) = details {
        body["error"]["details"] = details;
    }
    (status, Json(body)).into_response()
}
