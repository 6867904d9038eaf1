//! Configuration for provisiond
//!
//! One immutable [`ProvisioningConfig`] is constructed at startup and passed
//! by reference into the operations and providers; there are no ambient
//! global lookups. Precedence: built-in defaults, then an optional YAML
//! file, then `PROVISIOND_*` environment variables.

use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ProvisionError, Result};
use crate::providers::Scope;

/// Process-wide provisioning configuration, read-only after construction.
#[derive(Debug, Clone)]
pub struct ProvisioningConfig {
    /// Filesystem evidence that the target application is installed.
    /// Observed only, never created by this tool.
    pub marker_path: PathBuf,
    /// Remote URL of the target application's installer.
    pub installer_url: String,
    /// Remote URL of this agent's own binary, used by `install` when the
    /// running executable cannot be located.
    pub agent_url: String,
    /// Self-install destination for the agent binary.
    pub agent_path: PathBuf,
    /// Temporary path the installer is staged at before execution.
    pub staging_path: PathBuf,
    /// Stable autostart entry name. Install, check and optout must agree on
    /// it or optout cannot find what install created.
    pub entry_name: String,
    /// Autostart scope: per-user or machine-wide.
    pub scope: Scope,
    /// Argument passed to the installer for an unattended run.
    pub silent_flag: String,
    /// Account names that are never provisioned (service/admin accounts).
    pub excluded_accounts: Vec<String>,
    /// Override for the autostart directory; `None` uses the scope's
    /// platform default.
    pub autostart_dir: Option<PathBuf>,
}

/// On-disk YAML shape; every field optional, merged over defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    marker_path: Option<PathBuf>,
    installer_url: Option<String>,
    agent_url: Option<String>,
    agent_path: Option<PathBuf>,
    staging_path: Option<PathBuf>,
    entry_name: Option<String>,
    scope: Option<Scope>,
    silent_flag: Option<String>,
    excluded_accounts: Option<Vec<String>>,
    autostart_dir: Option<PathBuf>,
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("/etc"));
        Self {
            marker_path: config_dir.join("discord"),
            installer_url:
                "https://discord.com/api/downloads/distributions/app/installers/latest?channel=stable&platform=linux&arch=x64"
                    .to_string(),
            agent_url: "https://github.com/thatonecodedev/provisiond/releases/latest/provisiond"
                .to_string(),
            agent_path: PathBuf::from("/usr/local/bin/provisiond"),
            staging_path: staging_base().join("discord-setup.bin"),
            entry_name: "provisiond-check".to_string(),
            scope: Scope::Machine,
            silent_flag: "/S".to_string(),
            excluded_accounts: vec!["root".to_string()],
            autostart_dir: None,
        }
    }
}

impl ProvisioningConfig {
    /// Load configuration: defaults, then the optional YAML file, then
    /// `PROVISIOND_*` environment overrides. Validates path invariants.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = file {
            let text = std::fs::read_to_string(path).map_err(|e| {
                ProvisionError::ConfigReadFailed {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                }
            })?;
            let parsed: ConfigFile = serde_yaml::from_str(&text).map_err(|e| {
                ProvisionError::ConfigParseFailed {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                }
            })?;
            config.apply_file(parsed);
        }

        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(v) = file.marker_path {
            self.marker_path = v;
        }
        if let Some(v) = file.installer_url {
            self.installer_url = v;
        }
        if let Some(v) = file.agent_url {
            self.agent_url = v;
        }
        if let Some(v) = file.agent_path {
            self.agent_path = v;
        }
        if let Some(v) = file.staging_path {
            self.staging_path = v;
        }
        if let Some(v) = file.entry_name {
            self.entry_name = v;
        }
        if let Some(v) = file.scope {
            self.scope = v;
        }
        if let Some(v) = file.silent_flag {
            self.silent_flag = v;
        }
        if let Some(v) = file.excluded_accounts {
            self.excluded_accounts = v;
        }
        if let Some(v) = file.autostart_dir {
            self.autostart_dir = Some(v);
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(v) = env::var("PROVISIOND_MARKER_PATH") {
            self.marker_path = PathBuf::from(v);
        }
        if let Ok(v) = env::var("PROVISIOND_INSTALLER_URL") {
            self.installer_url = v;
        }
        if let Ok(v) = env::var("PROVISIOND_AGENT_URL") {
            self.agent_url = v;
        }
        if let Ok(v) = env::var("PROVISIOND_AGENT_PATH") {
            self.agent_path = PathBuf::from(v);
        }
        if let Ok(v) = env::var("PROVISIOND_STAGING_PATH") {
            self.staging_path = PathBuf::from(v);
        }
        if let Ok(v) = env::var("PROVISIOND_ENTRY_NAME") {
            self.entry_name = v;
        }
        if let Ok(v) = env::var("PROVISIOND_SCOPE") {
            self.scope = match v.to_lowercase().as_str() {
                "user" => Scope::User,
                "machine" => Scope::Machine,
                other => {
                    return Err(ProvisionError::ConfigInvalid {
                        message: format!("PROVISIOND_SCOPE must be 'user' or 'machine', got '{}'", other),
                    });
                }
            };
        }
        if let Ok(v) = env::var("PROVISIOND_SILENT_FLAG") {
            self.silent_flag = v;
        }
        if let Ok(v) = env::var("PROVISIOND_EXCLUDED_ACCOUNTS") {
            self.excluded_accounts = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        if let Ok(v) = env::var("PROVISIOND_AUTOSTART_DIR") {
            self.autostart_dir = Some(PathBuf::from(v));
        }
        Ok(())
    }

    /// All paths must be absolute: the command line written into the
    /// autostart entry is executed from an unknown working directory.
    fn validate(&self) -> Result<()> {
        for (field, path) in [
            ("marker_path", &self.marker_path),
            ("agent_path", &self.agent_path),
            ("staging_path", &self.staging_path),
        ] {
            if !path.is_absolute() {
                return Err(ProvisionError::ConfigInvalid {
                    message: format!("{} must be absolute, got '{}'", field, path.display()),
                });
            }
        }
        if let Some(dir) = &self.autostart_dir {
            if !dir.is_absolute() {
                return Err(ProvisionError::ConfigInvalid {
                    message: format!("autostart_dir must be absolute, got '{}'", dir.display()),
                });
            }
        }
        if self.entry_name.is_empty() {
            return Err(ProvisionError::ConfigInvalid {
                message: "entry_name must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Command line the autostart entry should point at: the staged agent
    /// binary re-invoked with `check`.
    pub fn autostart_command(&self) -> String {
        format!("\"{}\" check", self.agent_path.display())
    }

    /// True when `account` is on the never-provision list. Matching is
    /// case-insensitive, mirroring how login account names are compared.
    pub fn is_excluded_account(&self, account: &str) -> bool {
        self.excluded_accounts
            .iter()
            .any(|a| a.eq_ignore_ascii_case(account))
    }
}

/// Name of the account invoking us, from the environment.
pub fn current_account() -> Option<String> {
    env::var("USER").or_else(|_| env::var("USERNAME")).ok()
}

/// Absolute base for the default staging path. `env::temp_dir` honors
/// TMPDIR, which may be relative and would break the absolute-path
/// invariant.
fn staging_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() { t } else { PathBuf::from("/tmp") }
}
