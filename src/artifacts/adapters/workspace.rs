//! `cap-std` backed spec workspace.

use crate::artifacts::ports::{SpecWorkspace, SpecWorkspaceError, SpecWorkspaceResult};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::OpenOptions;
use cap_std::fs_utf8::Dir;
use std::io::{self, Write};
use tracing::debug;

/// Writes and removes spec files through a directory capability.
///
/// Ambient authority is used only to open the containing directory; the
/// file itself is created and removed relative to that capability. Files
/// are created with `create_new`, so a name already in use is reported
/// rather than overwritten.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapStdSpecWorkspace;

impl CapStdSpecWorkspace {
    /// Creates a workspace adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn split_path(path: &Utf8Path) -> io::Result<(&Utf8Path, &str)> {
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "spec path has no file name")
    })?;
    Ok((parent, file_name))
}

impl SpecWorkspace for CapStdSpecWorkspace {
    fn write_spec(
        &self,
        directory: &Utf8Path,
        file_name: &str,
        contents: &str,
    ) -> SpecWorkspaceResult<Utf8PathBuf> {
        let path = directory.join(file_name);
        let dir = Dir::open_ambient_dir(directory, ambient_authority())
            .map_err(|err| SpecWorkspaceError::write(path.clone(), err))?;
        let mut file = match dir.open_with(file_name, OpenOptions::new().write(true).create_new(true)) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                return Err(SpecWorkspaceError::exists(path));
            }
            Err(err) => return Err(SpecWorkspaceError::write(path, err)),
        };
        file.write_all(contents.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|err| SpecWorkspaceError::write(path.clone(), err))?;
        debug!(path = %path, "wrote file spec");
        Ok(path)
    }

    fn remove_spec(&self, path: &Utf8Path) -> SpecWorkspaceResult<()> {
        let (parent, file_name) =
            split_path(path).map_err(|err| SpecWorkspaceError::remove(path.to_owned(), err))?;
        let dir = match Dir::open_ambient_dir(parent, ambient_authority()) {
            Ok(dir) => dir,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(SpecWorkspaceError::remove(path.to_owned(), err)),
        };
        match dir.remove_file(file_name) {
            Ok(()) => {
                debug!(path = %path, "removed file spec");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SpecWorkspaceError::remove(path.to_owned(), err)),
        }
    }
}
