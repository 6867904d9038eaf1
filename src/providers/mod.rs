//! Capability providers consumed by the provisioning operations
//!
//! The operations are generic over these traits so the core state machine
//! stays platform-agnostic and testable with in-memory fakes:
//! - [`Fetcher`]: retrieve a resource at a URL to a local path
//! - [`ProcessRunner`]: execute a local binary and await its exit status
//! - [`AutostartStore`]: persist a named command to run at login

pub mod autostart;
pub mod fetch;
pub mod run;

pub use autostart::DesktopAutostartStore;
pub use fetch::HttpFetcher;
pub use run::SystemRunner;

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Whether an autostart entry applies to the current user or the whole machine.
///
/// Machine scope requires elevation; the OS enforces this and the store
/// surfaces it as an access error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    User,
    Machine,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::User => write!(f, "user"),
            Scope::Machine => write!(f, "machine"),
        }
    }
}

/// Retrieves a resource at a URL into a local file, overwriting any
/// previous content at the destination.
///
/// Network and disk failures surface as one `FetchFailed` kind; the
/// operations do not distinguish DNS failure from disk-full.
pub trait Fetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<()>;
}

/// Executes a local binary with arguments and blocks until it exits.
///
/// A launch failure (binary missing, not executable) is reported as
/// `LaunchFailed`, distinct from the child running and returning a
/// nonzero exit code.
pub trait ProcessRunner {
    fn run(&self, path: &Path, args: &[&str]) -> Result<i32>;
}

/// Persistent "run at login" store keyed by (scope, name).
///
/// `set` overwrites unconditionally, `get` returns the stored command line,
/// `delete` is a no-op when the entry is absent. Permission failures
/// surface as `AutostartAccess`.
pub trait AutostartStore {
    fn set(&self, scope: Scope, name: &str, command: &str) -> Result<()>;
    fn get(&self, scope: Scope, name: &str) -> Result<Option<String>>;
    fn delete(&self, scope: Scope, name: &str) -> Result<()>;

    /// Audit record persisted next to the entry: "provisioning installed".
    /// Plain key/value, unversioned.
    fn set_record(&self, scope: Scope, name: &str) -> Result<()>;
    fn delete_record(&self, scope: Scope, name: &str) -> Result<()>;
}
