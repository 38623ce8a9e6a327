//! Command dispatching.
//!
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{load_config, VskitConfig};
use crate::error::Result;
use crate::ui::UserInterface;

use super::check::CheckCommand;
use super::convert::ConvertCommand;
use super::install::InstallCommand;
use super::launcher::LauncherCommand;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Load configuration with the CLI overrides applied.
    pub fn load_config(&self, cli: &Cli) -> Result<VskitConfig> {
        let mut config = load_config(&self.project_root, cli.config.as_deref())?;
        if let Some(python) = &cli.python {
            config.python = Some(python.clone());
        }
        tracing::debug!("Effective config: {:?}", config);
        Ok(config)
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.load_config(cli)?;

        match &cli.command {
            Commands::Convert(args) => ConvertCommand::new(config, args.clone()).execute(ui),
            Commands::Check(args) => CheckCommand::new(config, args.clone()).execute(ui),
            Commands::Install(args) => {
                InstallCommand::new(&self.project_root, config, args.clone()).execute(ui)
            }
            Commands::Launcher(args) => LauncherCommand::new(config, args.clone()).execute(ui),
        }
    }
}
