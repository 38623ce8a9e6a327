//! Library probes.
//!
//! A probe attempts to load a tracked dependency and report its version.
//! [`PythonProbe`] does this by running short import snippets through the
//! configured interpreter; [`MockProbe`] answers from a fixed table for tests.
//!
//! # Example
//!
//! ```
//! use vskit::requirements::{Library, LibraryProbe, PythonProbe};
//! use vskit::shell::MockRunner;
//!
//! let mut runner = MockRunner::new();
//! runner.respond("import numpy", MockRunner::ok("1.26.4\n"));
//!
//! let probe = PythonProbe::new("python", &runner);
//! assert_eq!(probe.version(Library::NumPy).unwrap(), "1.26.4");
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::error::VskitError;
use crate::shell::ProcessRunner;

use super::library::Library;

/// `core.version()` prints a banner; the release is on the `Core R72` line.
static VAPOURSYNTH_CORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Core\s+(R\d+)").expect("valid regex"));

/// Failure to obtain a version from a probe.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// The dependency (or the interpreter) is not installed.
    #[error("{library} not found")]
    NotFound { library: String },

    /// The dependency is present but loading it failed.
    #[error("{library} failed to load: {message}")]
    Failed { library: String, message: String },
}

/// Hardware acceleration reported by the tensor library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accelerator {
    /// CUDA is usable.
    Available {
        /// Name of device 0.
        device: String,
        /// CUDA runtime version the build targets, if reported.
        cuda_version: Option<String>,
    },
    /// CUDA is not usable in this environment.
    Unavailable,
}

/// Capability that loads a named dependency and reports its version.
pub trait LibraryProbe {
    /// Version string of `library`, or a distinct not-found signal.
    fn version(&self, library: Library) -> Result<String, ProbeError>;

    /// Whether the tensor library reports CUDA acceleration.
    fn accelerator(&self) -> Result<Accelerator, ProbeError>;
}

/// Probe that runs `<python> -c <snippet>` through a [`ProcessRunner`].
pub struct PythonProbe<'a> {
    python: String,
    runner: &'a dyn ProcessRunner,
}

impl<'a> PythonProbe<'a> {
    /// Create a probe for the given interpreter.
    pub fn new(python: &str, runner: &'a dyn ProcessRunner) -> Self {
        Self {
            python: python.to_string(),
            runner,
        }
    }

    /// Interpreter this probe runs.
    pub fn python(&self) -> &str {
        &self.python
    }

    fn snippet(library: Library) -> &'static str {
        match library {
            Library::Python => "import sys; print('%d.%d.%d' % sys.version_info[:3])",
            Library::NumPy => "import numpy; print(numpy.__version__)",
            Library::Torch => "import torch; print(torch.__version__)",
            Library::VapourSynth => "import vapoursynth as vs; print(vs.core.version())",
        }
    }

    fn run_snippet(&self, library: Library, code: &str) -> Result<String, ProbeError> {
        let args = vec!["-c".to_string(), code.to_string()];
        let name = library.display_name().to_string();

        let result = self.runner.run(&self.python, &args).map_err(|e| match e {
            VskitError::CommandNotFound { .. } => ProbeError::NotFound {
                library: name.clone(),
            },
            other => ProbeError::Failed {
                library: name.clone(),
                message: other.to_string(),
            },
        })?;

        if result.success {
            return Ok(result.stdout);
        }

        let diagnostic = result.diagnostic();
        if is_missing_module(&diagnostic) {
            Err(ProbeError::NotFound { library: name })
        } else {
            Err(ProbeError::Failed {
                library: name,
                message: last_line(&diagnostic).to_string(),
            })
        }
    }
}

impl LibraryProbe for PythonProbe<'_> {
    fn version(&self, library: Library) -> Result<String, ProbeError> {
        let stdout = self.run_snippet(library, Self::snippet(library))?;
        Ok(normalize_version(library, &stdout))
    }

    fn accelerator(&self) -> Result<Accelerator, ProbeError> {
        let code = "import torch; a = torch.cuda.is_available(); \
                    name = torch.cuda.get_device_name(0) if a else ''; \
                    print('%d|%s|%s' % (a, name, torch.version.cuda or ''))";
        let stdout = self.run_snippet(Library::Torch, code)?;
        Ok(parse_accelerator(last_line(&stdout)))
    }
}

fn is_missing_module(diagnostic: &str) -> bool {
    diagnostic.contains("ModuleNotFoundError") || diagnostic.contains("No module named")
}

fn last_line(text: &str) -> &str {
    text.lines()
        .map(str::trim)
        .rfind(|l| !l.is_empty())
        .unwrap_or("")
}

/// Reduce raw probe output to the version identifier the rules match on.
///
/// VapourSynth reports a multi-line banner; everything else prints the bare
/// version as its last line.
pub fn normalize_version(library: Library, raw: &str) -> String {
    if library == Library::VapourSynth {
        if let Some(caps) = VAPOURSYNTH_CORE.captures(raw) {
            return caps[1].to_string();
        }
    }
    last_line(raw).to_string()
}

fn parse_accelerator(line: &str) -> Accelerator {
    let mut parts = line.splitn(3, '|');
    let available = parts.next().map(str::trim) == Some("1");
    if !available {
        return Accelerator::Unavailable;
    }
    let device = parts.next().unwrap_or("").trim().to_string();
    let cuda_version = parts
        .next()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from);
    Accelerator::Available {
        device,
        cuda_version,
    }
}

/// Probe answering from a fixed table. Libraries without an entry are not found.
#[derive(Debug, Clone, Default)]
pub struct MockProbe {
    versions: HashMap<Library, Result<String, ProbeError>>,
    accelerator: Option<Accelerator>,
}

impl MockProbe {
    /// Create a probe where nothing is installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `version` for `library`.
    pub fn with_version(mut self, library: Library, version: &str) -> Self {
        self.versions.insert(library, Ok(version.to_string()));
        self
    }

    /// Report a load failure for `library`.
    pub fn with_failure(mut self, library: Library, message: &str) -> Self {
        self.versions.insert(
            library,
            Err(ProbeError::Failed {
                library: library.display_name().to_string(),
                message: message.to_string(),
            }),
        );
        self
    }

    /// Report the given accelerator state.
    pub fn with_accelerator(mut self, accelerator: Accelerator) -> Self {
        self.accelerator = Some(accelerator);
        self
    }

    /// The known-good environment: Python 3.12, NumPy 1.26.4, cu118 torch
    /// with a CUDA device, VapourSynth R72.
    pub fn healthy() -> Self {
        Self::new()
            .with_version(Library::Python, "3.12.4")
            .with_version(Library::NumPy, "1.26.4")
            .with_version(Library::Torch, "2.7.0+cu118")
            .with_version(Library::VapourSynth, "R72")
            .with_accelerator(Accelerator::Available {
                device: "NVIDIA GeForce RTX 3060".to_string(),
                cuda_version: Some("11.8".to_string()),
            })
    }
}

impl LibraryProbe for MockProbe {
    fn version(&self, library: Library) -> Result<String, ProbeError> {
        self.versions
            .get(&library)
            .cloned()
            .unwrap_or_else(|| {
                Err(ProbeError::NotFound {
                    library: library.display_name().to_string(),
                })
            })
    }

    fn accelerator(&self) -> Result<Accelerator, ProbeError> {
        Ok(self.accelerator.clone().unwrap_or(Accelerator::Unavailable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockRunner;

    #[test]
    fn python_probe_reads_version() {
        let mut runner = MockRunner::new();
        runner.respond("import torch", MockRunner::ok("2.7.0+cu118\n"));
        let probe = PythonProbe::new("python3", &runner);

        assert_eq!(probe.version(Library::Torch).unwrap(), "2.7.0+cu118");
        let calls = runner.calls();
        assert_eq!(calls[0].program, "python3");
        assert_eq!(calls[0].args[0], "-c");
    }

    #[test]
    fn missing_module_is_not_found() {
        let mut runner = MockRunner::new();
        runner.respond(
            "import vapoursynth",
            MockRunner::fail(
                1,
                concat!(
                    "Traceback (most recent call last):\n",
                    "ModuleNotFoundError: No module named 'vapoursynth'"
                ),
            ),
        );
        let probe = PythonProbe::new("python", &runner);

        assert_eq!(
            probe.version(Library::VapourSynth),
            Err(ProbeError::NotFound {
                library: "VapourSynth".to_string()
            })
        );
    }

    #[test]
    fn missing_interpreter_is_not_found() {
        let mut runner = MockRunner::new();
        runner.missing("python");
        let probe = PythonProbe::new("python", &runner);

        assert!(matches!(
            probe.version(Library::Python),
            Err(ProbeError::NotFound { .. })
        ));
    }

    #[test]
    fn import_error_is_failed_with_last_line() {
        let mut runner = MockRunner::new();
        runner.respond(
            "import numpy",
            MockRunner::fail(1, "Traceback\n  File x\nImportError: DLL load failed\n"),
        );
        let probe = PythonProbe::new("python", &runner);

        match probe.version(Library::NumPy) {
            Err(ProbeError::Failed { message, .. }) => {
                assert_eq!(message, "ImportError: DLL load failed")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn vapoursynth_banner_is_normalized() {
        let banner = "VapourSynth Video Processing Library\n\
                      Copyright (c) 2012-2025 Fredrik Mellbin\n\
                      Core R72\n\
                      API R4.1\n";
        assert_eq!(normalize_version(Library::VapourSynth, banner), "R72");
    }

    #[test]
    fn plain_version_uses_last_line() {
        assert_eq!(
            normalize_version(Library::NumPy, "some warning\n1.26.4\n\n"),
            "1.26.4"
        );
    }

    #[test]
    fn accelerator_available() {
        let mut runner = MockRunner::new();
        runner.respond(
            "torch.cuda",
            MockRunner::ok("1|NVIDIA GeForce RTX 3060|11.8\n"),
        );
        let probe = PythonProbe::new("python", &runner);

        assert_eq!(
            probe.accelerator().unwrap(),
            Accelerator::Available {
                device: "NVIDIA GeForce RTX 3060".to_string(),
                cuda_version: Some("11.8".to_string()),
            }
        );
    }

    #[test]
    fn accelerator_unavailable() {
        assert_eq!(parse_accelerator("0||"), Accelerator::Unavailable);
        assert_eq!(parse_accelerator(""), Accelerator::Unavailable);
    }

    #[test]
    fn mock_probe_defaults_to_not_found() {
        let probe = MockProbe::new();
        assert!(matches!(
            probe.version(Library::NumPy),
            Err(ProbeError::NotFound { .. })
        ));
        assert_eq!(probe.accelerator().unwrap(), Accelerator::Unavailable);
    }
}
