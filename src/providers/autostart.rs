//! Autostart store backed by XDG autostart `.desktop` files
//!
//! User scope writes under `~/.config/autostart/`, machine scope under
//! `/etc/xdg/autostart/` (root-only, which is what makes machine scope an
//! elevated operation). One entry is one `<name>.desktop` file; the stored
//! command line lives on its `Exec=` line.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{ProvisionError, Result};
use crate::providers::{AutostartStore, Scope};

const MACHINE_AUTOSTART_DIR: &str = "/etc/xdg/autostart";

pub struct DesktopAutostartStore {
    /// Test override; production uses the scope's platform directory.
    base_dir: Option<PathBuf>,
}

impl DesktopAutostartStore {
    pub fn new() -> Self {
        Self { base_dir: None }
    }

    /// Store rooted at a fixed directory regardless of scope.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self {
            base_dir: Some(base_dir),
        }
    }

    fn dir_for(&self, scope: Scope) -> PathBuf {
        if let Some(base) = &self.base_dir {
            return base.clone();
        }
        match scope {
            Scope::User => dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("/etc/xdg"))
                .join("autostart"),
            Scope::Machine => PathBuf::from(MACHINE_AUTOSTART_DIR),
        }
    }

    fn entry_path(&self, scope: Scope, name: &str) -> PathBuf {
        self.dir_for(scope).join(format!("{}.desktop", name))
    }

    fn record_path(&self, scope: Scope, name: &str) -> PathBuf {
        self.dir_for(scope).join(format!("{}.provisioned", name))
    }

    fn access_error(name: &str, err: &std::io::Error) -> ProvisionError {
        ProvisionError::AutostartAccess {
            name: name.to_string(),
            reason: err.to_string(),
        }
    }

    fn write_file(&self, path: &Path, name: &str, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Self::access_error(name, &e))?;
        }
        fs::write(path, contents).map_err(|e| Self::access_error(name, &e))
    }

    fn remove_file(path: &Path, name: &str) -> Result<bool> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Self::access_error(name, &e)),
        }
    }
}

impl Default for DesktopAutostartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AutostartStore for DesktopAutostartStore {
    fn set(&self, scope: Scope, name: &str, command: &str) -> Result<()> {
        let contents = format!(
            "[Desktop Entry]\nType=Application\nName={}\nExec={}\nX-Provisiond-Scope={}\n",
            name, command, scope
        );
        self.write_file(&self.entry_path(scope, name), name, &contents)
    }

    fn get(&self, scope: Scope, name: &str) -> Result<Option<String>> {
        let text = match fs::read_to_string(self.entry_path(scope, name)) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Self::access_error(name, &e)),
        };
        Ok(text
            .lines()
            .find_map(|line| line.strip_prefix("Exec="))
            .map(str::to_string))
    }

    fn delete(&self, scope: Scope, name: &str) -> Result<()> {
        Self::remove_file(&self.entry_path(scope, name), name)?;
        Ok(())
    }

    fn set_record(&self, scope: Scope, name: &str) -> Result<()> {
        self.write_file(&self.record_path(scope, name), name, "provisioned=true\n")
    }

    fn delete_record(&self, scope: Scope, name: &str) -> Result<()> {
        Self::remove_file(&self.record_path(scope, name), name)?;
        Ok(())
    }
}
