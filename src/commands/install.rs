//! Install command wrapper

use console::style;

use crate::config::ProvisioningConfig;
use crate::error::Result;
use crate::operations::InstallOperation;
use crate::operations::install::StageOutcome;
use crate::providers::HttpFetcher;

/// Stage the agent binary and register the login-time `check` entry.
pub fn run(config: &ProvisioningConfig) -> Result<()> {
    println!("Staging agent at: {}", config.agent_path.display());

    let fetcher = HttpFetcher::new();
    let store = super::autostart_store(config);
    let operation = InstallOperation::new(
        config,
        &fetcher,
        &store,
        std::env::current_exe().ok(),
    );

    match operation.execute()? {
        StageOutcome::AlreadyStaged => {
            println!("Agent binary already present, skipping staging.");
        }
        StageOutcome::Copied => println!("Copied running executable to destination."),
        StageOutcome::Downloaded => {
            println!("Downloaded agent from: {}", config.agent_url);
        }
    }

    println!(
        "Autostart entry '{}' registered ({} scope).",
        config.entry_name, config.scope
    );
    println!(
        "{} The target will be checked at every login.",
        style("Provisioning installed.").green().bold()
    );
    Ok(())
}
