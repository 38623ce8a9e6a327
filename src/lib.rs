//! vskit - VapourSynth + SVP4 environment toolkit.
//!
//! Verifies that the Python dependencies of a VapourSynth/SVP4 setup are at
//! known-good versions, repairs them with a pinned install plan, writes a
//! desktop launcher, and converts media files between common formats.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Layered YAML configuration
//! - [`convert`] - Format table and conversion backends
//! - [`error`] - Error types and result aliases
//! - [`installer`] - Pinned package installation and launcher script
//! - [`requirements`] - Version probes, compatibility rules, check reports
//! - [`shell`] - Process execution
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use vskit::requirements::{Classification, Library, MockProbe, VersionChecker};
//!
//! let probe = MockProbe::healthy().with_version(Library::NumPy, "2.0.1");
//! let report = VersionChecker::default().run(&probe);
//! assert_eq!(report.status(), Classification::Error);
//! ```

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod installer;
pub mod requirements;
pub mod shell;
pub mod ui;

pub use error::{Result, VskitError};
