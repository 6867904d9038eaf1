//! In-memory provider fakes and config fixtures for operation tests
//!
//! The fakes record every call so tests can assert the "zero fetch, zero
//! run" properties, and can be switched into failure modes to exercise each
//! error path without a network or a real installer.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::ProvisioningConfig;
use crate::error::{ProvisionError, Result};
use crate::providers::{AutostartStore, Fetcher, ProcessRunner, Scope};

/// Config with every path under the test's temp directory.
pub fn test_config(temp: &TempDir) -> ProvisioningConfig {
    ProvisioningConfig {
        marker_path: temp.path().join("marker"),
        installer_url: "https://target.example/installer".to_string(),
        agent_url: "https://agent.example/provisiond".to_string(),
        agent_path: temp.path().join("bin/provisiond"),
        staging_path: temp.path().join("staged-installer.bin"),
        entry_name: "provisiond-check".to_string(),
        scope: Scope::User,
        silent_flag: "/S".to_string(),
        excluded_accounts: Vec::new(),
        autostart_dir: None,
    }
}

/// Fetcher that writes a canned payload, or fails every call.
pub struct FakeFetcher {
    payload: Option<Vec<u8>>,
    calls: RefCell<Vec<(String, PathBuf)>>,
}

impl FakeFetcher {
    pub fn serving(payload: &[u8]) -> Self {
        Self {
            payload: Some(payload.to_vec()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            payload: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Fetcher for FakeFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        self.calls
            .borrow_mut()
            .push((url.to_string(), dest.to_path_buf()));
        match &self.payload {
            Some(bytes) => {
                if let Some(parent) = dest.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(dest, bytes)?;
                Ok(())
            }
            None => Err(ProvisionError::FetchFailed {
                url: url.to_string(),
                reason: "simulated network failure".to_string(),
            }),
        }
    }
}

/// Runner that returns a fixed exit code, or fails to launch.
pub struct FakeRunner {
    exit_code: Option<i32>,
    calls: RefCell<Vec<(PathBuf, Vec<String>)>>,
}

impl FakeRunner {
    pub fn exiting(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing_to_launch() -> Self {
        Self {
            exit_code: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn last_call(&self) -> Option<(PathBuf, Vec<String>)> {
        self.calls.borrow().last().cloned()
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&self, path: &Path, args: &[&str]) -> Result<i32> {
        self.calls.borrow_mut().push((
            path.to_path_buf(),
            args.iter().map(|a| a.to_string()).collect(),
        ));
        self.exit_code.ok_or_else(|| ProvisionError::LaunchFailed {
            path: path.display().to_string(),
            reason: "simulated launch failure".to_string(),
        })
    }
}

/// HashMap-backed autostart store; `denying()` refuses every mutation the
/// way a store without the needed privileges would.
pub struct MemoryStore {
    entries: RefCell<HashMap<(Scope, String), String>>,
    records: RefCell<HashSet<(Scope, String)>>,
    deny: bool,
    deny_records: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
            records: RefCell::new(HashSet::new()),
            deny: false,
            deny_records: false,
        }
    }

    pub fn denying() -> Self {
        Self {
            deny: true,
            ..Self::new()
        }
    }

    /// Entries writable, records refused; exercises the audit-record path
    /// without blocking the registration itself.
    pub fn denying_records() -> Self {
        Self {
            deny_records: true,
            ..Self::new()
        }
    }

    pub fn entry_count(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn has_record(&self, scope: Scope, name: &str) -> bool {
        self.records.borrow().contains(&(scope, name.to_string()))
    }

    fn denied(&self, name: &str, record: bool) -> Result<()> {
        if self.deny || (record && self.deny_records) {
            Err(ProvisionError::AutostartAccess {
                name: name.to_string(),
                reason: "access denied".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AutostartStore for MemoryStore {
    fn set(&self, scope: Scope, name: &str, command: &str) -> Result<()> {
        self.denied(name, false)?;
        self.entries
            .borrow_mut()
            .insert((scope, name.to_string()), command.to_string());
        Ok(())
    }

    fn get(&self, scope: Scope, name: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(&(scope, name.to_string())).cloned())
    }

    fn delete(&self, scope: Scope, name: &str) -> Result<()> {
        self.denied(name, false)?;
        self.entries.borrow_mut().remove(&(scope, name.to_string()));
        Ok(())
    }

    fn set_record(&self, scope: Scope, name: &str) -> Result<()> {
        self.denied(name, true)?;
        self.records.borrow_mut().insert((scope, name.to_string()));
        Ok(())
    }

    fn delete_record(&self, scope: Scope, name: &str) -> Result<()> {
        self.denied(name, true)?;
        self.records.borrow_mut().remove(&(scope, name.to_string()));
        Ok(())
    }
}
