//! External command execution.

use crate::error::{Result, VskitError};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing an external command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// The most useful diagnostic text: stderr, or stdout when stderr is empty.
    pub fn diagnostic(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim().to_string()
        } else {
            stderr.to_string()
        }
    }
}

/// Capability for running an external program to completion.
///
/// Implementations block until the program exits. There is no timeout and no
/// retry; a non-zero exit is returned as a failed [`CommandResult`], not as an
/// error. Errors are reserved for programs that could not be started.
pub trait ProcessRunner {
    /// Run `program` with `args` and capture its output.
    fn run(&self, program: &str, args: &[String]) -> Result<CommandResult>;
}

/// [`ProcessRunner`] backed by [`std::process::Command`].
///
/// Children inherit the working directory and environment of vskit.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandResult> {
        execute(program, args)
    }
}

/// Execute a program directly (no shell) and capture stdout and stderr.
pub fn execute(program: &str, args: &[String]) -> Result<CommandResult> {
    let start = Instant::now();
    let rendered = format_command(program, args);
    tracing::debug!("Running: {}", rendered);

    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let output = cmd.output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            VskitError::CommandNotFound {
                program: program.to_string(),
            }
        } else {
            VskitError::CommandFailed {
                command: rendered.clone(),
                code: None,
            }
        }
    })?;

    let duration = start.elapsed();
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    tracing::debug!(
        "Finished in {}ms with status {:?}: {}",
        duration.as_millis(),
        output.status.code(),
        rendered
    );

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

/// Render a program and its arguments as a single display string.
///
/// Arguments containing whitespace are double-quoted. The result is for logs
/// and dry-run output only; it is never handed to a shell.
pub fn format_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .map(|part| {
            if part.is_empty() || part.contains(char::is_whitespace) {
                format!("\"{}\"", part)
            } else {
                part.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
