//! Check operation: probe the installed state, install the target if absent
//!
//! Runs unattended at every login via the autostart entry. Missing installed
//! state and unreachable network are expected steady states here, not
//! anomalies; only the installer's own failure after a successful fetch is an
//! error with its own exit code.

use crate::config::ProvisioningConfig;
use crate::error::{ProvisionError, Result};
use crate::probe;
use crate::providers::{Fetcher, ProcessRunner};
use crate::staged::StagedInstaller;

/// How a successful `check` concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The invoking account is on the exclusion list; nothing was touched.
    ExcludedAccount,
    /// The target was already present; no fetch, no run.
    AlreadyInstalled,
    /// The installer was fetched, ran, and exited zero.
    Installed,
}

pub struct CheckOperation<'a, F: Fetcher, R: ProcessRunner> {
    config: &'a ProvisioningConfig,
    fetcher: &'a F,
    runner: &'a R,
}

impl<'a, F: Fetcher, R: ProcessRunner> CheckOperation<'a, F, R> {
    pub fn new(config: &'a ProvisioningConfig, fetcher: &'a F, runner: &'a R) -> Self {
        Self {
            config,
            fetcher,
            runner,
        }
    }

    /// `account` is the name of the invoking login account, when known.
    pub fn execute(&self, account: Option<&str>) -> Result<CheckOutcome> {
        // Policy gate before any probe or network activity: excluded
        // (service/admin) accounts are never provisioned.
        if let Some(account) = account {
            if self.config.is_excluded_account(account) {
                return Ok(CheckOutcome::ExcludedAccount);
            }
        }

        if probe::is_installed(self.config) {
            return Ok(CheckOutcome::AlreadyInstalled);
        }

        // The guard removes the staged file on every path out of this
        // function, including fetch and launch failures.
        let staged = StagedInstaller::new(self.config.staging_path.clone());

        self.fetcher
            .fetch(&self.config.installer_url, staged.path())?;
        crate::staged::mark_executable(staged.path())?;

        // Blocking, no timeout: a hung installer hangs this invocation.
        let code = self
            .runner
            .run(staged.path(), &[self.config.silent_flag.as_str()])?;
        if code != 0 {
            return Err(ProvisionError::InstallerFailed { code });
        }

        Ok(CheckOutcome::Installed)
    }
}
