//! Session authentication service.
//!
//! # Data Flow
//! ```text
//! POST /api/login {username, password}
//!     → accounts.rs (Argon2id verify, dummy verify for unknown users)
//!     → sessions.rs (UUID v4 token, expiry = now + ttl)
//!     → Set-Cookie: session=<token>; HttpOnly; SameSite=Strict
//!
//! GET /api/me (Cookie: session=<token>)
//!     → sessions.rs (lookup; expired entries removed here)
//!
//! POST /api/logout
//!     → sessions.rs (remove if present) → cookie cleared
//! ```

pub mod accounts;
pub mod cookie;
pub mod handlers;
pub mod service;
pub mod sessions;

use axum::{
    routing::{get, post},
    Router,
};

pub use accounts::{AccountStore, PasswordError};
pub use service::{AuthError, Authenticator};
pub use sessions::{Session, SessionStore};

use self::handlers::*;
use crate::http::response::not_found;

/// Routes for the session authentication service.
pub fn setup_auth_router(state: AuthState) -> Router {
    Router::new()
        .route("/api/me", get(me))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .method_not_allowed_fallback(not_found)
        .fallback(not_found)
        .with_state(state)
}
