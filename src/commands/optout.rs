//! Optout command wrapper

use console::style;

use crate::config::ProvisioningConfig;
use crate::error::Result;
use crate::operations::OptoutOperation;
use crate::privilege;

/// Remove the autostart entry and the provisioning record.
pub fn run(config: &ProvisioningConfig) -> Result<()> {
    let store = super::autostart_store(config);
    let operation = OptoutOperation::new(config, &store, privilege::is_elevated());

    if operation.execute()? {
        println!(
            "{} Autostart entry '{}' removed.",
            style("Opted out.").green().bold(),
            config.entry_name
        );
    } else {
        println!(
            "Autostart entry '{}' was not present, nothing to remove.",
            config.entry_name
        );
    }
    Ok(())
}
