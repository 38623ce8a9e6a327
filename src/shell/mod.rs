//! External process execution and environment lookup.
//!
//! Everything that leaves the process (pip, python probes, ffmpeg) goes
//! through the [`ProcessRunner`] trait so callers can be tested with
//! [`MockRunner`] instead of real binaries.

pub mod command;
pub mod mock;
pub mod path;
pub mod platform;

pub use command::{execute, format_command, CommandResult, ProcessRunner, SystemRunner};
pub use mock::{MockRunner, RecordedCall};
pub use path::{parse_system_path, resolve_tool_path};
pub use platform::{is_ci, is_windows};
