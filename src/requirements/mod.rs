//! Environment verification.
//!
//! This module checks whether the Python dependencies of the VapourSynth
//! environment are installed at compatible versions, and whether the desktop
//! applications it feeds are present.
//!
//! # Modules
//!
//! - [`library`] - The tracked dependencies and their pinned versions
//! - [`rules`] - Ordered compatibility rule table
//! - [`probe`] - Capabilities that report installed versions
//! - [`checker`] - Classifies probe results into a report
//! - [`apps`] - SVP4 / PotPlayer / ffmpeg install detection
//! - [`status`] - Classification lattice and report types

pub mod apps;
pub mod checker;
pub mod library;
pub mod probe;
pub mod rules;
pub mod status;

pub use apps::{check_transcoder, Application, ApplicationLocator};
pub use checker::{VersionChecker, ACCELERATOR_CHECK};
pub use library::{Library, TORCH_CU118_INDEX};
pub use probe::{Accelerator, LibraryProbe, MockProbe, ProbeError, PythonProbe};
pub use rules::{CompatibilityRule, RuleTable, VersionPattern, Verdict};
pub use status::{aggregate, CheckReport, CheckResult, Classification};
