//! Process runner backed by std::process::Command

use std::path::Path;
use std::process::Command;

use crate::error::{ProvisionError, Result};
use crate::providers::ProcessRunner;

/// Runs a local binary and blocks until it exits. There is deliberately no
/// timeout: a hung installer hangs the invocation (documented limitation).
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, path: &Path, args: &[&str]) -> Result<i32> {
        let status = Command::new(path).args(args).status().map_err(|e| {
            ProvisionError::LaunchFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        // Killed by signal on unix: no code to classify, treat as a failed
        // launch rather than inventing an installer exit status.
        status.code().ok_or_else(|| ProvisionError::LaunchFailed {
            path: path.display().to_string(),
            reason: "terminated by signal".to_string(),
        })
    }
}
