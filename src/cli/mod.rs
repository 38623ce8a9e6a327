//! Command-line interface for vskit.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{CheckArgs, Cli, Commands, ConvertArgs, InstallArgs, LauncherArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
