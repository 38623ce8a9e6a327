//! Environment repair.
//!
//! - [`packages`] - pinned pip installation with backup and verification
//! - [`launcher`] - desktop batch file that starts SVP4 and PotPlayer

pub mod launcher;
pub mod packages;

pub use launcher::{
    default_launcher_path, LauncherScript, LauncherWriter, DEFAULT_LAUNCHER_NAME,
    SVP4_STARTUP_WAIT_SECS,
};
pub use packages::{
    backup_file_name, latest_backup, pinned_steps, FailurePolicy, InstallOptions, InstallOutcome,
    InstallStep, PackageInstaller, CONFLICTING_PACKAGES,
};
