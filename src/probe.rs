//! Installed-state probe
//!
//! Answers "is the target application currently installed?" by looking for
//! its per-user marker. Always queries fresh: the state can change between
//! invocations (a previous `check` succeeded, or the user installed by hand).

use crate::config::ProvisioningConfig;

/// True when the target application's marker exists on disk.
pub fn is_installed(config: &ProvisioningConfig) -> bool {
    config.marker_path.exists()
}
