//! Install operation: stage the agent binary and register it for autostart

use std::path::PathBuf;

use crate::config::ProvisioningConfig;
use crate::error::Result;
use crate::providers::{AutostartStore, Fetcher};

/// Ensures the agent binary sits at its shared destination and that the
/// autostart entry points at it with `check` appended. Safe to re-run:
/// staging is skipped when the destination exists, and the entry write is
/// an unconditional overwrite of one stable name.
pub struct InstallOperation<'a, F: Fetcher, S: AutostartStore> {
    config: &'a ProvisioningConfig,
    fetcher: &'a F,
    store: &'a S,
    /// The running executable, copied to the destination when available.
    /// `None` falls back to downloading `agent_url`.
    self_exe: Option<PathBuf>,
}

/// What `execute` did for the staging step, for the caller's log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    AlreadyStaged,
    Copied,
    Downloaded,
}

impl<'a, F: Fetcher, S: AutostartStore> InstallOperation<'a, F, S> {
    pub fn new(
        config: &'a ProvisioningConfig,
        fetcher: &'a F,
        store: &'a S,
        self_exe: Option<PathBuf>,
    ) -> Self {
        Self {
            config,
            fetcher,
            store,
            self_exe,
        }
    }

    pub fn execute(&self) -> Result<StageOutcome> {
        let outcome = self.stage_agent()?;

        // Unconditional overwrite keeps the entry pointing at the current
        // destination path even if a previous install used another one.
        self.store.set(
            self.config.scope,
            &self.config.entry_name,
            &self.config.autostart_command(),
        )?;
        // The record is audit-only: failing to write it must not turn a
        // successful registration into an error with the entry left behind.
        let _ = self
            .store
            .set_record(self.config.scope, &self.config.entry_name);

        Ok(outcome)
    }

    fn stage_agent(&self) -> Result<StageOutcome> {
        if self.config.agent_path.exists() {
            return Ok(StageOutcome::AlreadyStaged);
        }

        if let Some(parent) = self.config.agent_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        match &self.self_exe {
            Some(exe) if exe.exists() => {
                std::fs::copy(exe, &self.config.agent_path)?;
                Ok(StageOutcome::Copied)
            }
            _ => {
                self.fetcher
                    .fetch(&self.config.agent_url, &self.config.agent_path)?;
                crate::staged::mark_executable(&self.config.agent_path)?;
                Ok(StageOutcome::Downloaded)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProvisionError;
    use crate::providers::Scope;
    use crate::test_fixtures::{FakeFetcher, MemoryStore, test_config};
    use tempfile::TempDir;

    #[test]
    fn test_install_copies_running_exe_and_writes_entry() {
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp);
        let source = temp.path().join("running-agent");
        std::fs::write(&source, b"agent bytes").unwrap();

        let fetcher = FakeFetcher::serving(b"downloaded");
        let store = MemoryStore::new();
        let op = InstallOperation::new(&config, &fetcher, &store, Some(source));

        assert_eq!(op.execute().unwrap(), StageOutcome::Copied);
        assert_eq!(
            std::fs::read(&config.agent_path).unwrap(),
            b"agent bytes".to_vec()
        );
        assert_eq!(
            store.get(config.scope, &config.entry_name).unwrap().as_deref(),
            Some(config.autostart_command().as_str())
        );
        assert!(store.has_record(config.scope, &config.entry_name));
        assert_eq!(fetcher.call_count(), 0);
    }

    #[test]
    fn test_install_downloads_when_no_running_exe() {
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp);

        let fetcher = FakeFetcher::serving(b"downloaded agent");
        let store = MemoryStore::new();
        let op = InstallOperation::new(&config, &fetcher, &store, None);

        assert_eq!(op.execute().unwrap(), StageOutcome::Downloaded);
        assert_eq!(fetcher.call_count(), 1);
        assert!(config.agent_path.exists());
    }

    #[test]
    fn test_install_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp);
        let source = temp.path().join("running-agent");
        std::fs::write(&source, b"agent").unwrap();

        let fetcher = FakeFetcher::serving(b"");
        let store = MemoryStore::new();
        let op = InstallOperation::new(&config, &fetcher, &store, Some(source));

        assert_eq!(op.execute().unwrap(), StageOutcome::Copied);
        assert_eq!(op.execute().unwrap(), StageOutcome::AlreadyStaged);
        assert_eq!(op.execute().unwrap(), StageOutcome::AlreadyStaged);

        // one staged binary, one entry, no duplicate downloads
        assert_eq!(fetcher.call_count(), 0);
        assert_eq!(store.entry_count(), 1);
    }

    #[test]
    fn test_store_denial_fails_after_staging() {
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp);
        let source = temp.path().join("running-agent");
        std::fs::write(&source, b"agent").unwrap();

        let fetcher = FakeFetcher::serving(b"");
        let store = MemoryStore::denying();
        let op = InstallOperation::new(&config, &fetcher, &store, Some(source));

        let err = op.execute().unwrap_err();
        assert!(matches!(err, ProvisionError::AutostartAccess { .. }));
        // the staged binary is the one permitted side effect
        assert!(config.agent_path.exists());
        assert_eq!(store.entry_count(), 0);
    }

    #[test]
    fn test_record_write_failure_does_not_fail_a_registered_install() {
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp);
        let source = temp.path().join("running-agent");
        std::fs::write(&source, b"agent").unwrap();

        let fetcher = FakeFetcher::serving(b"");
        let store = MemoryStore::denying_records();
        let op = InstallOperation::new(&config, &fetcher, &store, Some(source));

        // registration succeeded, the audit record is best-effort
        assert_eq!(op.execute().unwrap(), StageOutcome::Copied);
        assert_eq!(
            store.get(config.scope, &config.entry_name).unwrap().as_deref(),
            Some(config.autostart_command().as_str())
        );
        assert!(!store.has_record(config.scope, &config.entry_name));
    }

    #[test]
    fn test_entry_points_at_destination_not_source() {
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp);
        let source = temp.path().join("somewhere-else/agent");
        std::fs::create_dir_all(source.parent().unwrap()).unwrap();
        std::fs::write(&source, b"agent").unwrap();

        let fetcher = FakeFetcher::serving(b"");
        let store = MemoryStore::new();
        InstallOperation::new(&config, &fetcher, &store, Some(source.clone()))
            .execute()
            .unwrap();

        let command = store.get(Scope::User, &config.entry_name).unwrap().unwrap();
        assert!(command.contains(&config.agent_path.display().to_string()));
        assert!(!command.contains("somewhere-else"));
        assert!(command.ends_with(" check"));
    }
}
