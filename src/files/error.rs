//! File access error definitions.

use std::path::PathBuf;
use thiserror::Error;

/// Reason string for empty or whitespace-only input.
pub const EMPTY_INPUT: &str = "filename must not be empty";
/// Reason string for input carrying a NUL byte (raw or percent-encoded).
pub const NULL_BYTE: &str = "null byte not allowed";

/// Errors produced by the validated file access path.
#[derive(Debug, Error)]
pub enum FileError {
    /// Input rejected before resolution (empty, NUL byte).
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// Resolved path falls outside the base directory.
    #[error("path escapes base directory")]
    PathEscapesBase,

    #[error("file not found")]
    NotFound,

    /// Resolved path names a directory.
    #[error("cannot read a directory")]
    IsDirectory,

    /// Any other I/O failure. Never shown to the caller.
    #[error("read failure: {0}")]
    ReadFailure(#[from] std::io::Error),
}

/// Errors produced by the unguarded read path.
#[derive(Debug, Error)]
pub enum UnvalidatedReadError {
    /// Nothing exists at the joined path. Carries the path on purpose.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("read error: {0}")]
    Read(#[source] std::io::Error),
}
