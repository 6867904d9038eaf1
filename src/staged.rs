//! Scoped staging for the downloaded installer
//!
//! The staged installer is the one resource with a hard cleanup guarantee:
//! it must be gone after every exit path out of `check` (success, installer
//! failure, fetch failure). Owning the path in a Drop guard makes the
//! guarantee hold through `?` returns as well.

use std::path::{Path, PathBuf};

/// Guard owning the staging path; removes the file when dropped.
#[derive(Debug)]
pub struct StagedInstaller {
    path: PathBuf,
}

impl StagedInstaller {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// The fetcher writes a plain file; the runner needs it executable.
#[cfg(unix)]
pub fn mark_executable(path: &Path) -> crate::error::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).map_err(|e| {
        crate::error::ProvisionError::LaunchFailed {
            path: path.display().to_string(),
            reason: format!("cannot mark executable: {}", e),
        }
    })
}

#[cfg(not(unix))]
pub fn mark_executable(_path: &Path) -> crate::error::Result<()> {
    Ok(())
}

impl Drop for StagedInstaller {
    fn drop(&mut self) {
        // Absence is fine: the fetch may have failed before writing.
        if self.path.exists() {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}
