//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed by
//! [`CommandDispatcher`]. Commands that touch the system expose a
//! `run_with` variant taking injected runners and probes.

pub mod check;
pub mod convert;
pub mod dispatcher;
pub mod install;
pub mod launcher;

pub use check::CheckCommand;
pub use convert::ConvertCommand;
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use install::InstallCommand;
pub use launcher::LauncherCommand;
