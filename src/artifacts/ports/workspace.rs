//! Working-directory port for temporary file specs.

use camino::{Utf8Path, Utf8PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Result type for spec workspace operations.
pub type SpecWorkspaceResult<T> = Result<T, SpecWorkspaceError>;

/// Creates and removes file spec documents in the working directory.
pub trait SpecWorkspace: Send + Sync {
    /// Creates `file_name` inside `directory`, writes `contents` to it and
    /// returns the full path. An existing file is never overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`SpecWorkspaceError::Exists`] when the file already exists and
    /// [`SpecWorkspaceError::Write`] when it cannot be created or written.
    fn write_spec(
        &self,
        directory: &Utf8Path,
        file_name: &str,
        contents: &str,
    ) -> SpecWorkspaceResult<Utf8PathBuf>;

    /// Removes a spec file. A file that does not exist is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`SpecWorkspaceError::Remove`] when an existing file cannot be
    /// removed.
    fn remove_spec(&self, path: &Utf8Path) -> SpecWorkspaceResult<()>;
}

/// Errors returned by spec workspace adapters.
#[derive(Debug, Clone, Error)]
pub enum SpecWorkspaceError {
    /// A file with the requested name already exists.
    #[error("file spec {path} already exists")]
    Exists {
        /// Path that is already taken.
        path: Utf8PathBuf,
    },

    /// Writing the spec file failed.
    #[error("failed writing file spec {path}: {source}")]
    Write {
        /// Target path.
        path: Utf8PathBuf,
        /// Underlying error.
        source: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// Removing the spec file failed.
    #[error("failed removing file spec {path}: {source}")]
    Remove {
        /// Target path.
        path: Utf8PathBuf,
        /// Underlying error.
        source: Arc<dyn std::error::Error + Send + Sync>,
    },
}

impl SpecWorkspaceError {
    /// Reports a name that is already taken.
    #[must_use]
    pub fn exists(path: impl Into<Utf8PathBuf>) -> Self {
        Self::Exists { path: path.into() }
    }

    /// Wraps a write failure.
    #[must_use]
    pub fn write(
        path: impl Into<Utf8PathBuf>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Write {
            path: path.into(),
            source: Arc::new(err),
        }
    }

    /// Wraps a removal failure.
    #[must_use]
    pub fn remove(
        path: impl Into<Utf8PathBuf>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Remove {
            path: path.into(),
            source: Arc::new(err),
        }
    }

    /// Returns the affected path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        match self {
            Self::Exists { path } | Self::Write { path, .. } | Self::Remove { path, .. } => path,
        }
    }

    /// Returns whether the error reports a name collision. The colliding
    /// file belongs to someone else and must not be removed.
    #[must_use]
    pub const fn is_collision(&self) -> bool {
        matches!(self, Self::Exists { .. })
    }
}
