//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// provisiond - self-provisioning agent
///
/// Ensures a target application is installed on this machine, re-running
/// itself at every user login until that condition holds.
#[derive(Parser, Debug)]
#[command(
    name = "provisiond",
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Self-provisioning agent for a target application",
    long_about = "provisiond keeps a target application installed: 'install' registers the agent \
                  to re-run at every login, 'check' installs the target when it is absent, and \
                  'optout' reverses the registration.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  provisiond install\n    \
                  provisiond check\n    \
                  provisiond optout\n    \
                  provisiond --config /etc/provisiond.yaml install\n\n\
                  \x1b[1m\x1b[32mExit codes:\x1b[0m\n    \
                  0 success, 2 invalid command, 10 fetch, 11 launch,\n    \
                  12 installer failure, 13 privilege denied, 14 autostart access"
)]
pub struct Cli {
    /// Configuration file (YAML); defaults and PROVISIOND_* env vars apply otherwise
    #[arg(long, short = 'c', global = true, env = "PROVISIOND_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stage the agent binary and register the login-time check
    Install,

    /// Install the target application if it is absent (login hook)
    Check,

    /// Remove the autostart registration (requires elevation for machine scope)
    Optout,
}
