//! Error types and handling for provisiond
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Every variant maps to a stable process exit code via [`ProvisionError::exit_code`]
//! so the login hook that re-invokes `check` can tell transient failures (fetch)
//! apart from configuration failures (privilege, autostart access).

use miette::Diagnostic;
use thiserror::Error;

/// Process exit codes, stable across releases.
pub mod exit {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const INVALID_ARGUMENT: i32 = 2;
    pub const FETCH: i32 = 10;
    pub const LAUNCH: i32 = 11;
    pub const INSTALLER: i32 = 12;
    pub const PRIVILEGE: i32 = 13;
    pub const AUTOSTART: i32 = 14;
}

/// Main error type for provisiond operations
#[derive(Error, Diagnostic, Debug)]
pub enum ProvisionError {
    // Fetch errors: network and disk failures are one kind on purpose,
    // the login cadence retries both the same way.
    #[error("Failed to fetch '{url}': {reason}")]
    #[diagnostic(
        code(provisiond::fetch::failed),
        help("Check network reachability and that the destination directory is writable")
    )]
    FetchFailed { url: String, reason: String },

    // Launch vs installer failure: could not start the binary at all,
    // versus the binary ran and reported a nonzero exit.
    #[error("Failed to launch installer at '{path}': {reason}")]
    #[diagnostic(
        code(provisiond::launch::failed),
        help("Check that the staged installer exists and is executable")
    )]
    LaunchFailed { path: String, reason: String },

    #[error("Installer exited with status {code}")]
    #[diagnostic(code(provisiond::installer::failed))]
    InstallerFailed { code: i32 },

    #[error("Operation requires elevated privileges")]
    #[diagnostic(
        code(provisiond::privilege::denied),
        help("Re-run as root (machine-scoped autostart entries live under /etc)")
    )]
    PrivilegeDenied,

    #[error("Cannot access autostart entry '{name}': {reason}")]
    #[diagnostic(
        code(provisiond::autostart::access),
        help("Machine scope requires elevation; user scope requires a writable home directory")
    )]
    AutostartAccess { name: String, reason: String },

    #[error("Invalid or missing command: {input}")]
    #[diagnostic(
        code(provisiond::cli::invalid_argument),
        help("Valid commands: install, check, optout, help")
    )]
    InvalidArgument { input: String },

    // Configuration errors
    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(provisiond::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(provisiond::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(provisiond::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(provisiond::fs::io_error))]
    IoError { message: String },
}

impl ProvisionError {
    /// Stable exit code for this failure kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            ProvisionError::FetchFailed { .. } => exit::FETCH,
            ProvisionError::LaunchFailed { .. } => exit::LAUNCH,
            ProvisionError::InstallerFailed { .. } => exit::INSTALLER,
            ProvisionError::PrivilegeDenied => exit::PRIVILEGE,
            ProvisionError::AutostartAccess { .. } => exit::AUTOSTART,
            ProvisionError::InvalidArgument { .. } => exit::INVALID_ARGUMENT,
            ProvisionError::ConfigInvalid { .. }
            | ProvisionError::ConfigParseFailed { .. }
            | ProvisionError::ConfigReadFailed { .. }
            | ProvisionError::IoError { .. } => exit::GENERAL,
        }
    }
}

impl From<std::io::Error> for ProvisionError {
    fn from(err: std::io::Error) -> Self {
        ProvisionError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, ProvisionError>;
