//! provisiond - self-provisioning agent
//!
//! Keeps a target application installed on this machine: `install` registers
//! the agent to re-run at every user login, `check` (the login hook)
//! installs the target when it is absent, and `optout` reverses the
//! registration. Every failure kind maps to a stable exit code so the login
//! scheduler can tell transient failures from configuration failures.

use std::ffi::OsString;

use clap::CommandFactory;
use clap::Parser;
use clap::error::ErrorKind;

mod cli;
mod commands;
mod config;
mod error;
mod operations;
mod privilege;
mod probe;
mod providers;
mod staged;
#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};
use config::ProvisioningConfig;
use error::{ProvisionError, exit};

/// Lowercase the command token so `INSTALL`, `Install` and `install` are the
/// same command. Flags, flag values and everything after the command are
/// left alone.
fn normalize_command_token(mut args: Vec<OsString>) -> Vec<OsString> {
    let mut skip_next = false;
    for arg in args.iter_mut().skip(1) {
        if skip_next {
            skip_next = false;
            continue;
        }
        let Some(text) = arg.to_str() else { break };
        // --config takes a value; --config=path is caught by the '-' check
        if text == "--config" || text == "-c" {
            skip_next = true;
            continue;
        }
        if text.starts_with('-') {
            continue;
        }
        *arg = OsString::from(text.to_ascii_lowercase());
        break;
    }
    args
}

fn parse_cli(args: Vec<OsString>) -> Cli {
    match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            std::process::exit(exit::SUCCESS);
        }
        Err(_) => {
            let input = args
                .get(1)
                .map(|a| a.to_string_lossy().into_owned())
                .unwrap_or_default();
            let err = ProvisionError::InvalidArgument { input };
            eprintln!("Error: {}", err);
            std::process::exit(err.exit_code());
        }
    }
}

fn main() {
    let args = normalize_command_token(std::env::args_os().collect());
    let cli = parse_cli(args);

    // No command at all prints usage and succeeds; it is not an error for
    // someone to run the binary to see what it does.
    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        std::process::exit(exit::SUCCESS);
    };

    let config = match ProvisioningConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    };

    let result = match command {
        Commands::Install => commands::install::run(&config),
        Commands::Check => commands::check::run(&config),
        Commands::Optout => commands::optout::run(&config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
