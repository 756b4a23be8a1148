//! Error → response mapping.
//!
//! # Responsibilities
//! - Give each error category one fixed status and JSON shape
//! - Log unexpected failures server-side, return generic bodies to clients
//!
//! # Design Decisions
//! - Validation (400), authentication (401), authorization (403) and
//!   not-found (404) never share a shape
//! - Login failures have a single body regardless of cause
//! - Only the deliberately unguarded read route echoes a path on failure

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::auth::service::AuthError;
use crate::files::error::{FileError, UnvalidatedReadError};
use crate::orders::authorizer::AccessError;

/// Generic body for failed logins.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Fallback for unmatched routes.
pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn internal_error() -> Response {
    error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}

impl IntoResponse for FileError {
    fn into_response(self) -> Response {
        match self {
            FileError::InvalidInput(reason) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "errors": [{ "type": "field", "msg": reason, "path": "filename", "location": "body" }]
                })),
            )
                .into_response(),
            FileError::PathEscapesBase => error_body(StatusCode::FORBIDDEN, "Path traversal detected"),
            FileError::NotFound => error_body(StatusCode::NOT_FOUND, "File not found"),
            FileError::IsDirectory => error_body(StatusCode::BAD_REQUEST, "Cannot read a directory"),
            FileError::ReadFailure(e) => {
                tracing::error!(error = %e, "File read failed");
                internal_error()
            }
        }
    }
}

impl IntoResponse for UnvalidatedReadError {
    fn into_response(self) -> Response {
        match self {
            UnvalidatedReadError::NotFound(path) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "File not found", "path": path.to_string_lossy() })),
            )
                .into_response(),
            UnvalidatedReadError::Read(e) => {
                tracing::error!(error = %e, "Unvalidated read failed");
                error_body(StatusCode::INTERNAL_SERVER_ERROR, "Read error")
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "success": false, "message": INVALID_CREDENTIALS })),
            )
                .into_response(),
            AuthError::Internal(detail) => {
                tracing::error!(error = %detail, "Login failed unexpectedly");
                internal_error()
            }
        }
    }
}

impl IntoResponse for AccessError {
    fn into_response(self) -> Response {
        match self {
            AccessError::Unauthenticated => error_body(StatusCode::UNAUTHORIZED, "Authentication required"),
            AccessError::Forbidden => error_body(StatusCode::FORBIDDEN, "Access forbidden"),
            AccessError::NotFound => error_body(StatusCode::NOT_FOUND, "Order does not exist"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases: Vec<(Response, StatusCode)> = vec![
            (FileError::InvalidInput("x").into_response(), StatusCode::BAD_REQUEST),
            (FileError::PathEscapesBase.into_response(), StatusCode::FORBIDDEN),
            (FileError::NotFound.into_response(), StatusCode::NOT_FOUND),
            (FileError::IsDirectory.into_response(), StatusCode::BAD_REQUEST),
            (
                FileError::ReadFailure(std::io::Error::other("disk on fire")).into_response(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AuthError::Unauthorized.into_response(), StatusCode::UNAUTHORIZED),
            (AccessError::Unauthenticated.into_response(), StatusCode::UNAUTHORIZED),
            (AccessError::Forbidden.into_response(), StatusCode::FORBIDDEN),
            (AccessError::NotFound.into_response(), StatusCode::NOT_FOUND),
        ];

        for (response, expected) in cases {
            assert_eq!(response.status(), expected);
        }
    }
}
