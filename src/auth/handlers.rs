//! HTTP handlers for the session authentication service.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::auth::cookie::CookieSettings;
use crate::auth::service::{AuthError, Authenticator};

/// State shared by the auth handlers.
#[derive(Clone)]
pub struct AuthState {
    pub authenticator: Arc<Authenticator>,
    pub cookie: CookieSettings,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// `GET /api/me`
pub async fn me(State(state): State<AuthState>, headers: HeaderMap) -> Response {
    let username = state
        .cookie
        .read(&headers)
        .and_then(|token| state.authenticator.resolve(&token))
        .and_then(|session| state.authenticator.username_for(&session).map(str::to_owned));

    match username {
        Some(username) => Json(json!({ "authenticated": true, "username": username })).into_response(),
        None => (StatusCode::UNAUTHORIZED, Json(json!({ "authenticated": false }))).into_response(),
    }
}

/// `POST /api/login`
///
/// Bodies that are not a `{username, password}` object fail like bad credentials.
pub async fn login(
    State(state): State<AuthState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, AuthError> {
    let Ok(Json(request)) = payload else {
        return Err(AuthError::Unauthorized);
    };

    let session = state
        .authenticator
        .login(&request.username, &request.password)
        .await?;

    let mut headers = HeaderMap::new();
    if let Some(cookie) = state.cookie.issue(&session.token) {
        headers.insert(header::SET_COOKIE, cookie);
    }

    Ok((headers, Json(json!({ "success": true, "token": session.token }))).into_response())
}

/// `POST /api/logout`
pub async fn logout(State(state): State<AuthState>, headers: HeaderMap) -> Response {
    if let Some(token) = state.cookie.read(&headers) {
        state.authenticator.logout(&token);
    }

    let mut response_headers = HeaderMap::new();
    if let Some(cookie) = state.cookie.clear() {
        response_headers.insert(header::SET_COOKIE, cookie);
    }

    (response_headers, Json(json!({ "success": true }))).into_response()
}
