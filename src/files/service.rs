//! File reads and sample seeding on top of the resolver.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::files::error::{FileError, UnvalidatedReadError};
use crate::files::resolver::{join_unchecked, resolve_safe, BaseDir};

/// Files written by [`FileService::seed_samples`], relative to the base.
pub const SAMPLE_TEMPLATES: &[(&str, &str)] = &[
    ("hello.txt", "Hello from safe rewritten file!\n"),
    ("notes/readme.md", "# Readme\nSample content here."),
];

/// A successful read, as returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct FileContents {
    pub path: String,
    pub content: String,
}

/// File access confined to one base directory.
#[derive(Debug, Clone)]
pub struct FileService {
    base: BaseDir,
}

impl FileService {
    /// Create the service and make sure the base directory exists.
    ///
    /// Failing to create the directory is logged, not fatal; reads will
    /// report `NotFound` until it exists.
    pub fn new(base_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let base = BaseDir::new(base_dir)?;
        if let Err(e) = std::fs::create_dir_all(base.path()) {
            tracing::warn!(base = %base.path().display(), error = %e, "Could not create base directory");
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &BaseDir {
        &self.base
    }

    /// Resolve `filename` inside the base directory and read it.
    pub async fn read(&self, filename: &str) -> Result<FileContents, FileError> {
        let path = match resolve_safe(&self.base, filename) {
            Ok(path) => path,
            Err(e) => {
                if matches!(e, FileError::PathEscapesBase) {
                    tracing::warn!(input = %filename.escape_debug(), "Path traversal rejected");
                    crate::observability::metrics::record_path_rejection();
                }
                return Err(e);
            }
        };

        let metadata = tokio::fs::metadata(&path).await.map_err(not_found_or_failure)?;
        if metadata.is_dir() {
            return Err(FileError::IsDirectory);
        }

        let bytes = tokio::fs::read(&path).await.map_err(not_found_or_failure)?;
        Ok(FileContents {
            path: path.to_string_lossy().into_owned(),
            content: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }

    /// INSECURE: read whatever `filename` names relative to the base, with no
    /// decoding and no boundary check. Kept for side-by-side comparison.
    pub async fn read_unchecked(&self, filename: &str) -> Result<FileContents, UnvalidatedReadError> {
        let joined = join_unchecked(self.base.path(), filename);

        if !tokio::fs::try_exists(&joined).await.unwrap_or(false) {
            return Err(UnvalidatedReadError::NotFound(joined));
        }

        let bytes = tokio::fs::read(&joined).await.map_err(UnvalidatedReadError::Read)?;
        Ok(FileContents {
            path: joined.to_string_lossy().into_owned(),
            content: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }

    /// Write [`SAMPLE_TEMPLATES`] through the resolver.
    ///
    /// Templates the resolver rejects are skipped. Returns the paths written.
    pub async fn seed_samples(&self) -> Result<Vec<PathBuf>, FileError> {
        let mut written = Vec::with_capacity(SAMPLE_TEMPLATES.len());

        for (relative, text) in SAMPLE_TEMPLATES {
            let Ok(resolved) = resolve_safe(&self.base, relative) else {
                continue;
            };

            if let Some(dir) = resolved.parent() {
                tokio::fs::create_dir_all(dir).await?;
            }
            tokio::fs::write(&resolved, text).await?;
            written.push(resolved);
        }

        tracing::info!(base = %self.base.path().display(), count = written.len(), "Sample files written");
        Ok(written)
    }
}

fn not_found_or_failure(e: std::io::Error) -> FileError {
    if e.kind() == ErrorKind::NotFound {
        FileError::NotFound
    } else {
        FileError::ReadFailure(e)
    }
}
