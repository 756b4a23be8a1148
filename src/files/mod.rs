//! File access service (path traversal demo).
//!
//! # Data Flow
//! ```text
//! POST /read {filename}
//!     → handlers.rs (body validation)
//!     → resolver.rs (decode, lexical join, boundary check)
//!     → service.rs (metadata + read)
//!     → 200 {path, content} | mapped FileError
//!
//! POST /read-no-validate {filename}
//!     → resolver::join_unchecked (no checks) → service.rs
//! ```

pub mod error;
pub mod handlers;
pub mod resolver;
pub mod service;

use axum::{routing::post, Router};

pub use error::FileError;
pub use resolver::{join_unchecked, resolve_safe, BaseDir};
pub use service::FileService;

use self::handlers::*;
use crate::http::response::not_found;

/// Routes for the file access service.
pub fn setup_files_router(state: FilesState, expose_unvalidated_route: bool) -> Router {
    let mut router = Router::new()
        .route("/read", post(read_file))
        .route("/setup-sample", post(setup_sample));

    if expose_unvalidated_route {
        router = router.route("/read-no-validate", post(read_file_unvalidated));
    }

    // Must follow the last `.route`: it only covers routes already added.
    router
        .method_not_allowed_fallback(not_found)
        .fallback(not_found)
        .with_state(state)
}
