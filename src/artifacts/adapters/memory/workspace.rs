//! In-memory spec workspace.

use crate::artifacts::ports::{SpecWorkspace, SpecWorkspaceError, SpecWorkspaceResult};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// Spec workspace that keeps files in memory and can inject failures.
#[derive(Debug, Clone, Default)]
pub struct InMemorySpecWorkspace {
    state: Arc<RwLock<InMemoryWorkspaceState>>,
}

#[derive(Debug, Default)]
struct InMemoryWorkspaceState {
    files: BTreeMap<Utf8PathBuf, String>,
    removed: Vec<Utf8PathBuf>,
    fail_writes: bool,
    fail_removals: bool,
}

fn lock_error(path: &Utf8Path, err: impl ToString) -> SpecWorkspaceError {
    SpecWorkspaceError::write(path.to_owned(), std::io::Error::other(err.to_string()))
}

fn remove_lock_error(path: &Utf8Path, err: impl ToString) -> SpecWorkspaceError {
    SpecWorkspaceError::remove(path.to_owned(), std::io::Error::other(err.to_string()))
}

impl InMemorySpecWorkspace {
    /// Creates an empty workspace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a file in the workspace as if another writer had created it.
    ///
    /// # Errors
    ///
    /// Returns an error when lock acquisition fails.
    pub fn insert_file(&self, path: impl Into<Utf8PathBuf>, contents: &str) -> SpecWorkspaceResult<()> {
        let target = path.into();
        let mut state = self.state.write().map_err(|err| lock_error(&target, err))?;
        state.files.insert(target, contents.to_owned());
        Ok(())
    }

    /// Makes subsequent writes fail.
    ///
    /// # Errors
    ///
    /// Returns an error when lock acquisition fails.
    pub fn fail_writes(&self) -> SpecWorkspaceResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| lock_error(Utf8Path::new("."), err))?;
        state.fail_writes = true;
        Ok(())
    }

    /// Makes subsequent removals of existing files fail.
    ///
    /// # Errors
    ///
    /// Returns an error when lock acquisition fails.
    pub fn fail_removals(&self) -> SpecWorkspaceResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| lock_error(Utf8Path::new("."), err))?;
        state.fail_removals = true;
        Ok(())
    }

    /// Returns the paths of files currently present.
    ///
    /// # Errors
    ///
    /// Returns an error when lock acquisition fails.
    pub fn files(&self) -> SpecWorkspaceResult<Vec<Utf8PathBuf>> {
        let state = self
            .state
            .read()
            .map_err(|err| lock_error(Utf8Path::new("."), err))?;
        Ok(state.files.keys().cloned().collect())
    }

    /// Returns the contents of a file currently present.
    ///
    /// # Errors
    ///
    /// Returns an error when lock acquisition fails.
    pub fn contents(&self, path: &Utf8Path) -> SpecWorkspaceResult<Option<String>> {
        let state = self.state.read().map_err(|err| lock_error(path, err))?;
        Ok(state.files.get(path).cloned())
    }

    /// Returns paths that were removed, in removal order.
    ///
    /// # Errors
    ///
    /// Returns an error when lock acquisition fails.
    pub fn removed(&self) -> SpecWorkspaceResult<Vec<Utf8PathBuf>> {
        let state = self
            .state
            .read()
            .map_err(|err| lock_error(Utf8Path::new("."), err))?;
        Ok(state.removed.clone())
    }
}

impl SpecWorkspace for InMemorySpecWorkspace {
    fn write_spec(
        &self,
        directory: &Utf8Path,
        file_name: &str,
        contents: &str,
    ) -> SpecWorkspaceResult<Utf8PathBuf> {
        let path = directory.join(file_name);
        let mut state = self.state.write().map_err(|err| lock_error(&path, err))?;
        if state.fail_writes {
            return Err(SpecWorkspaceError::write(
                path,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only workspace"),
            ));
        }
        if state.files.contains_key(&path) {
            return Err(SpecWorkspaceError::exists(path));
        }
        state.files.insert(path.clone(), contents.to_owned());
        Ok(path)
    }

    fn remove_spec(&self, path: &Utf8Path) -> SpecWorkspaceResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| remove_lock_error(path, err))?;
        if !state.files.contains_key(path) {
            return Ok(());
        }
        if state.fail_removals {
            return Err(SpecWorkspaceError::remove(
                path.to_owned(),
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "file is locked"),
            ));
        }
        state.files.remove(path);
        state.removed.push(path.to_owned());
        Ok(())
    }
}
