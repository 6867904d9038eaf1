//! Provisioning operations
//!
//! The core state machine behind the CLI commands:
//! - [`install::InstallOperation`]: stage the agent binary, write the
//!   autostart entry
//! - [`check::CheckOperation`]: probe, then fetch and run the installer
//! - [`optout::OptoutOperation`]: remove the autostart entry, gated on
//!   elevation for machine scope
//!
//! Each operation is idempotent: every action first checks whether it is
//! already satisfied, so repeated runs converge to the same end state.
//! Operations are generic over the provider traits in [`crate::providers`]
//! and are unit-tested with the in-memory fakes in `crate::test_fixtures`.

pub mod check;
pub mod install;
pub mod optout;

pub use check::{CheckOperation, CheckOutcome};
pub use install::InstallOperation;
pub use optout::OptoutOperation;
