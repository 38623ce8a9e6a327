//! Error types for vskit operations.
//!
//! This module defines [`VskitError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `VskitError` for domain-specific errors that need distinct handling
//! - Conversion failures are [`ConversionError`] values and are wrapped here
//!   only when they cross the command boundary
//! - Use `anyhow::Error` (via `VskitError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

use crate::convert::ConversionError;
use crate::requirements::Classification;

/// Core error type for vskit operations.
#[derive(Debug, Error)]
pub enum VskitError {
    /// Failed to parse a configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// An external program could not be found on PATH.
    #[error("Command not found: {program}")]
    CommandNotFound { program: String },

    /// An external program could not be started or waited on.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// A tracked dependency is not installed.
    #[error("{library} is not installed: {message}")]
    ProbeNotFound { library: String, message: String },

    /// A tracked dependency is installed at a version the rule table flags.
    #[error("{library} {version} failed verification ({severity}): {message}")]
    VersionMismatch {
        library: String,
        version: String,
        severity: Classification,
        message: String,
    },

    /// A mandatory installation step failed.
    #[error("Install step '{step}' failed: {message}")]
    InstallFailed { step: String, message: String },

    /// Refused to overwrite an existing file.
    #[error("{path} already exists (use --force to overwrite)")]
    AlreadyExists { path: PathBuf },

    /// A conversion failed.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for vskit operations.
pub type Result<T> = std::result::Result<T, VskitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = VskitError::ConfigParseError {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn command_not_found_displays_program() {
        let err = VskitError::CommandNotFound {
            program: "ffmpeg".into(),
        };
        assert!(err.to_string().contains("ffmpeg"));
    }

    #[test]
    fn version_mismatch_displays_severity() {
        let err = VskitError::VersionMismatch {
            library: "NumPy".into(),
            version: "2.0.1".into(),
            severity: Classification::Error,
            message: "install numpy==1.26.4".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("NumPy 2.0.1"));
        assert!(msg.contains("ERROR"));
        assert!(msg.contains("numpy==1.26.4"));
    }

    #[test]
    fn conversion_error_is_transparent() {
        let err: VskitError = ConversionError::UnsupportedInput {
            extension: ".heic".into(),
        }
        .into();
        assert!(matches!(err, VskitError::Conversion(_)));
        assert!(err.to_string().contains(".heic"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: VskitError = io_err.into();
        assert!(matches!(err, VskitError::Io(_)));
    }

    #[test]
    fn already_exists_mentions_force() {
        let err = VskitError::AlreadyExists {
            path: PathBuf::from("launch.bat"),
        };
        assert!(err.to_string().contains("--force"));
    }
}
