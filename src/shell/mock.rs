//! Scripted [`ProcessRunner`] for tests.
//!
//! `MockRunner` records every invocation and answers from a list of canned
//! responses matched against the rendered command line.
//!
//! # Example
//!
//! ```
//! use vskit::shell::{MockRunner, ProcessRunner};
//!
//! let mut runner = MockRunner::new();
//! runner.respond("import numpy", MockRunner::ok("1.26.4\n"));
//!
//! let args = vec!["-c".to_string(), "import numpy; print(numpy.__version__)".to_string()];
//! let result = runner.run("python", &args).unwrap();
//! assert_eq!(result.stdout.trim(), "1.26.4");
//! assert!(runner.was_called_with("numpy"));
//! ```

use std::cell::RefCell;
use std::time::Duration;

use crate::error::{Result, VskitError};

use super::command::{format_command, CommandResult, ProcessRunner};

/// One invocation captured by [`MockRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Program that was run.
    pub program: String,
    /// Arguments passed to it.
    pub args: Vec<String>,
}

impl RecordedCall {
    /// The call rendered the same way logs render it.
    pub fn command_line(&self) -> String {
        format_command(&self.program, &self.args)
    }
}

#[derive(Debug, Clone)]
enum Scripted {
    Output(CommandResult),
    NotFound,
}

/// [`ProcessRunner`] that never spawns anything.
///
/// Responses are matched by substring against the rendered command line.
/// Later registrations take precedence over earlier ones. Unmatched calls
/// succeed with empty output.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: Vec<(String, Scripted)>,
    missing_programs: Vec<String>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl MockRunner {
    /// Create a runner where every call succeeds with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// A successful result with the given stdout.
    pub fn ok(stdout: &str) -> CommandResult {
        CommandResult::success(stdout.to_string(), String::new(), Duration::ZERO)
    }

    /// A failed result with the given exit code and stderr.
    pub fn fail(code: i32, stderr: &str) -> CommandResult {
        CommandResult::failure(Some(code), String::new(), stderr.to_string(), Duration::ZERO)
    }

    /// Answer calls whose command line contains `pattern` with `result`.
    pub fn respond(&mut self, pattern: &str, result: CommandResult) {
        self.responses
            .push((pattern.to_string(), Scripted::Output(result)));
    }

    /// Make calls whose command line contains `pattern` fail to start.
    pub fn respond_not_found(&mut self, pattern: &str) {
        self.responses.push((pattern.to_string(), Scripted::NotFound));
    }

    /// Pretend `program` is not installed at all.
    pub fn missing(&mut self, program: &str) {
        self.missing_programs.push(program.to_string());
    }

    /// All captured calls, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Number of captured calls.
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Whether any captured call's command line contains `pattern`.
    pub fn was_called_with(&self, pattern: &str) -> bool {
        self.calls
            .borrow()
            .iter()
            .any(|c| c.command_line().contains(pattern))
    }
}

impl ProcessRunner for MockRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandResult> {
        let call = RecordedCall {
            program: program.to_string(),
            args: args.to_vec(),
        };
        let line = call.command_line();
        self.calls.borrow_mut().push(call);

        if self.missing_programs.iter().any(|p| p == program) {
            return Err(VskitError::CommandNotFound {
                program: program.to_string(),
            });
        }

        let scripted = self
            .responses
            .iter()
            .rev()
            .find(|(pattern, _)| line.contains(pattern.as_str()))
            .map(|(_, scripted)| scripted.clone());

        match scripted {
            Some(Scripted::Output(result)) => Ok(result),
            Some(Scripted::NotFound) => Err(VskitError::CommandNotFound {
                program: program.to_string(),
            }),
            None => Ok(Self::ok("")),
        }
    }
}
