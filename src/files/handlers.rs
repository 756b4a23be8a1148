//! HTTP handlers for the file access service.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::files::error::{FileError, EMPTY_INPUT, NULL_BYTE};
use crate::files::service::FileService;

/// Reason string when the `filename` field is absent.
pub const MISSING_FILENAME: &str = "filename required";
/// Reason string when `filename` is present but not a JSON string.
pub const NOT_A_STRING: &str = "filename must be a string";

/// State shared by the file access handlers.
#[derive(Clone)]
pub struct FilesState {
    pub service: Arc<FileService>,
}

/// Check the `filename` field of a `/read` body, returning it trimmed.
///
/// Checks run in order and stop at the first failure.
pub fn validate_filename(body: Option<&Value>) -> Result<String, FileError> {
    let field = body
        .and_then(|b| b.get("filename"))
        .filter(|v| !v.is_null())
        .ok_or(FileError::InvalidInput(MISSING_FILENAME))?;

    let raw = field.as_str().ok_or(FileError::InvalidInput(NOT_A_STRING))?;

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FileError::InvalidInput(EMPTY_INPUT));
    }
    if trimmed.contains('\0') {
        return Err(FileError::InvalidInput(NULL_BYTE));
    }

    Ok(trimmed.to_string())
}

/// `POST /read`
pub async fn read_file(
    State(state): State<FilesState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<crate::files::service::FileContents>, FileError> {
    let body = payload.ok().map(|Json(v)| v);
    let filename = validate_filename(body.as_ref())?;

    let contents = state.service.read(&filename).await?;
    tracing::debug!(path = %contents.path, "File read");
    Ok(Json(contents))
}

/// `POST /read-no-validate`
///
/// Deliberately unguarded. A missing or non-string filename is treated as empty.
pub async fn read_file_unvalidated(
    State(state): State<FilesState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let filename = payload
        .ok()
        .and_then(|Json(v)| v.get("filename").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_default();

    match state.service.read_unchecked(&filename).await {
        Ok(contents) => Json(contents).into_response(),
        Err(e) => e.into_response(),
    }
}

/// `POST /setup-sample`
pub async fn setup_sample(State(state): State<FilesState>) -> Response {
    match state.service.seed_samples().await {
        Ok(_) => Json(json!({
            "ok": true,
            "base": state.service.base().path().to_string_lossy(),
        }))
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Sample setup failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "Setup failed" }))).into_response()
        }
    }
}
