//! Optout operation: reversible removal of the autostart registration

use crate::config::ProvisioningConfig;
use crate::error::{ProvisionError, Result};
use crate::providers::{AutostartStore, Scope};

/// Removes the autostart entry and the provisioning record. The elevation
/// gate runs before any mutation, so a denied optout changes nothing.
/// Idempotent: a missing entry is a no-op, not an error.
pub struct OptoutOperation<'a, S: AutostartStore> {
    config: &'a ProvisioningConfig,
    store: &'a S,
    elevated: bool,
}

impl<'a, S: AutostartStore> OptoutOperation<'a, S> {
    pub fn new(config: &'a ProvisioningConfig, store: &'a S, elevated: bool) -> Self {
        Self {
            config,
            store,
            elevated,
        }
    }

    /// Returns true when an entry actually existed and was removed.
    pub fn execute(&self) -> Result<bool> {
        if self.config.scope == Scope::Machine && !self.elevated {
            return Err(ProvisionError::PrivilegeDenied);
        }

        let existed = self
            .store
            .get(self.config.scope, &self.config.entry_name)?
            .is_some();
        self.store
            .delete(self.config.scope, &self.config.entry_name)?;
        self.store
            .delete_record(self.config.scope, &self.config.entry_name)?;

        Ok(existed)
    }
}
