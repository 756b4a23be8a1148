//! Path resolution against a confinement directory.
//!
//! # Responsibilities
//! - Percent-decode untrusted input (falling back to the raw text)
//! - Collapse `.` / `..` lexically, without touching the filesystem
//! - Reject any result that is not the base directory or below it
//!
//! # Design Decisions
//! - The boundary check compares strings against a separator-terminated base,
//!   so `/srv/files-evil` never passes for `/srv/files`
//! - `join_unchecked` is the vulnerable variant and lives apart from
//!   `resolve_safe`; nothing in the validated path calls it

use std::borrow::Cow;
use std::io;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

use crate::files::error::{FileError, EMPTY_INPUT, NULL_BYTE};

/// An absolute, lexically normalized directory that resolved paths must stay in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseDir {
    path: PathBuf,
    /// `path` as a string, always ending in a separator.
    prefix: String,
}

impl BaseDir {
    /// Build a base directory. Relative paths are anchored at the current
    /// working directory.
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        let path = normalize_lexically(&absolute);

        let mut prefix = path.to_string_lossy().into_owned();
        if !prefix.ends_with(MAIN_SEPARATOR) {
            prefix.push(MAIN_SEPARATOR);
        }

        Ok(Self { path, prefix })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if `candidate` is the base itself or lies below it.
    ///
    /// `candidate` must already be normalized.
    pub fn contains(&self, candidate: &Path) -> bool {
        let candidate = candidate.to_string_lossy();
        candidate.starts_with(&self.prefix) || candidate == self.path.to_string_lossy()
    }
}

/// Resolve untrusted input to an absolute path inside `base`.
pub fn resolve_safe(base: &BaseDir, input: &str) -> Result<PathBuf, FileError> {
    if input.contains('\0') {
        return Err(FileError::InvalidInput(NULL_BYTE));
    }
    if input.trim().is_empty() {
        return Err(FileError::InvalidInput(EMPTY_INPUT));
    }

    // Malformed escapes or non-UTF-8 results keep the raw text.
    let decoded = if has_malformed_escape(input) {
        Cow::Borrowed(input)
    } else {
        urlencoding::decode(input).unwrap_or(Cow::Borrowed(input))
    };
    if decoded.contains('\0') {
        return Err(FileError::InvalidInput(NULL_BYTE));
    }

    // An absolute `decoded` replaces the base here; the boundary check catches it.
    let candidate = normalize_lexically(&base.path().join(decoded.as_ref()));

    if !base.contains(&candidate) {
        return Err(FileError::PathEscapesBase);
    }

    Ok(candidate)
}

/// True if some `%` is not followed by two hex digits.
///
/// `urlencoding::decode` passes such escapes through and decodes the rest;
/// the whole input must instead be taken literally.
fn has_malformed_escape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'%'
            && !matches!(
                bytes.get(i + 1..i + 3),
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()
            )
    })
}

/// INSECURE: join `input` onto `base` with no decoding and no boundary check.
///
/// Leading separators are stripped so the input never replaces the base, but
/// `..` segments are collapsed and may climb out of it. Only the
/// `/read-no-validate` route uses this.
pub fn join_unchecked(base: &Path, input: &str) -> PathBuf {
    let relative = input.trim_start_matches(['/', MAIN_SEPARATOR]);
    normalize_lexically(&base.join(relative))
}

/// Collapse `.` and `..` components without consulting the filesystem.
///
/// `..` at the root stays at the root.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}
