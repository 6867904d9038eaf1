//! CLI command wrappers
//!
//! Thin glue between the parsed CLI and the operations: each wrapper
//! constructs the real providers, delegates to its operation, and prints
//! progress lines. All business logic lives in [`crate::operations`].

pub mod check;
pub mod install;
pub mod optout;

use crate::config::ProvisioningConfig;
use crate::providers::DesktopAutostartStore;

fn autostart_store(config: &ProvisioningConfig) -> DesktopAutostartStore {
    match &config.autostart_dir {
        Some(dir) => DesktopAutostartStore::with_base_dir(dir.clone()),
        None => DesktopAutostartStore::new(),
    }
}
