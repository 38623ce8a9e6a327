//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// vskit - VapourSynth + SVP4 environment checker and file converter.
#[derive(Debug, Parser)]
#[command(name = "vskit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (skips the layered .vskit/config.yml lookup)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Python interpreter to inspect and install into
    #[arg(long, global = true, env = "VSKIT_PYTHON")]
    pub python: Option<String>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert a file to another format
    Convert(ConvertArgs),

    /// Verify the VapourSynth environment
    Check(CheckArgs),

    /// Install the pinned, known-good package versions
    Install(InstallArgs),

    /// Write a desktop launcher for SVP4 + PotPlayer
    Launcher(LauncherArgs),
}

/// Arguments for the `convert` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConvertArgs {
    /// File to convert
    #[arg(required_unless_present = "list")]
    pub input: Option<PathBuf>,

    /// Target extension, e.g. `.jpg` or `mp3`
    #[arg(
        short = 'o',
        long = "to",
        value_name = "EXT",
        required_unless_present = "list"
    )]
    pub target: Option<String>,

    /// List supported formats per category
    #[arg(long, conflicts_with_all = ["input", "target"])]
    pub list: bool,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Only check Python packages (skip SVP4, PotPlayer and ffmpeg)
    #[arg(long)]
    pub packages_only: bool,
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    /// Preview commands without executing
    #[arg(long)]
    pub dry_run: bool,

    /// Do not back up `pip freeze` output first
    #[arg(long)]
    pub skip_backup: bool,
}

/// Arguments for the `launcher` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct LauncherArgs {
    /// Where to write the batch file
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}
