//! Version checker for the tracked Python dependencies.
//!
//! The `VersionChecker` probes each [`Library`], classifies what it finds
//! against a [`RuleTable`], and returns the results as a [`CheckReport`].
//! It never modifies the environment it inspects.

use super::library::Library;
use super::probe::{Accelerator, LibraryProbe, ProbeError};
use super::rules::RuleTable;
use super::status::{CheckReport, CheckResult, Classification};

/// Display name used for the CUDA sub-check.
pub const ACCELERATOR_CHECK: &str = "CUDA";

/// Classifies installed library versions.
#[derive(Debug, Clone, Default)]
pub struct VersionChecker {
    rules: RuleTable,
}

impl VersionChecker {
    /// Create a checker using the given rule table.
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    /// The rule table in use.
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Check a single library.
    pub fn check(&self, probe: &dyn LibraryProbe, library: Library) -> CheckResult {
        let name = library.display_name();
        match probe.version(library) {
            Ok(version) => {
                let verdict = self.rules.classify(library, &version);
                CheckResult::new(name, Some(version), verdict.classification, verdict.message)
            }
            Err(ProbeError::NotFound { .. }) => {
                tracing::debug!("{} not found", name);
                CheckResult::new(
                    name,
                    None,
                    missing_severity(library),
                    format!("{} not installed; {}", name, library.install_hint()),
                )
            }
            Err(ProbeError::Failed { message, .. }) => {
                tracing::debug!("{} failed to load: {}", name, message);
                CheckResult::new(
                    name,
                    None,
                    missing_severity(library),
                    format!("{} failed to load ({}); {}", name, message, library.install_hint()),
                )
            }
        }
    }

    /// Check whether the tensor library can use CUDA.
    ///
    /// Acceleration is optional: the worst outcome is WARN.
    pub fn check_accelerator(&self, probe: &dyn LibraryProbe) -> CheckResult {
        match probe.accelerator() {
            Ok(Accelerator::Available {
                device,
                cuda_version,
            }) => {
                let message = match &cuda_version {
                    Some(v) => format!("CUDA {} available on {}", v, device),
                    None => format!("CUDA available on {}", device),
                };
                CheckResult::new(ACCELERATOR_CHECK, cuda_version, Classification::Ok, message)
            }
            Ok(Accelerator::Unavailable) => CheckResult::new(
                ACCELERATOR_CHECK,
                None,
                Classification::Warn,
                "CUDA not detected; playback falls back to CPU",
            ),
            Err(e) => CheckResult::new(
                ACCELERATOR_CHECK,
                None,
                Classification::Warn,
                format!("could not query CUDA: {}", e),
            ),
        }
    }

    /// Check every tracked library, plus the CUDA sub-check when PyTorch is
    /// installed.
    pub fn run(&self, probe: &dyn LibraryProbe) -> CheckReport {
        let mut results = Vec::with_capacity(Library::ALL.len() + 1);
        for library in Library::ALL {
            let result = self.check(probe, library);
            let torch_installed = library == Library::Torch && result.is_installed();
            results.push(result);
            if torch_installed {
                results.push(self.check_accelerator(probe));
            }
        }
        CheckReport::new(results)
    }
}

fn missing_severity(library: Library) -> Classification {
    if library.is_mandatory() {
        Classification::Error
    } else {
        Classification::Warn
    }
}
