//! Check command wrapper, run unattended at every login

use console::style;

use crate::config::{self, ProvisioningConfig};
use crate::error::Result;
use crate::operations::{CheckOperation, CheckOutcome};
use crate::providers::{HttpFetcher, SystemRunner};

/// Probe the installed state and install the target if absent.
pub fn run(config: &ProvisioningConfig) -> Result<()> {
    let account = config::current_account();
    println!(
        "Checking installed state for user: {}",
        account.as_deref().unwrap_or("(unknown)")
    );

    let fetcher = HttpFetcher::new();
    let runner = SystemRunner;
    let operation = CheckOperation::new(config, &fetcher, &runner);

    match operation.execute(account.as_deref())? {
        CheckOutcome::ExcludedAccount => {
            println!("Account is excluded from provisioning, nothing to do.");
        }
        CheckOutcome::AlreadyInstalled => {
            println!("Target is already installed, nothing to do.");
        }
        CheckOutcome::Installed => {
            println!(
                "{}",
                style("Target installed successfully.").green().bold()
            );
        }
    }
    Ok(())
}
