//! Check result types and the severity lattice.
//!
//! Each check produces a [`CheckResult`]; results are collected into an
//! ordered [`CheckReport`]. The overall status of a report is the worst
//! classification it contains (OK < WARN < ERROR).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VskitError};

/// Severity assigned to a single compatibility check.
///
/// Ordering is significant: `Ok < Warn < Error`, and aggregation is
/// worst-wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Known-good version.
    Ok,
    /// Works, but is untested, optional, or degraded.
    Warn,
    /// Known to break the environment.
    Error,
}

impl Classification {
    /// Status icon used by plain-text output.
    pub fn icon(&self) -> &'static str {
        match self {
            Classification::Ok => "✓",
            Classification::Warn => "⚠",
            Classification::Error => "✗",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Classification::Ok => "OK",
            Classification::Warn => "WARN",
            Classification::Error => "ERROR",
        };
        f.write_str(label)
    }
}

/// Fold classifications into the worst one. An empty input is OK.
pub fn aggregate<I>(classifications: I) -> Classification
where
    I: IntoIterator<Item = Classification>,
{
    classifications
        .into_iter()
        .max()
        .unwrap_or(Classification::Ok)
}

/// The outcome of checking one library or application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// Display name of what was checked.
    pub library: String,
    /// Detected version; `None` means not installed.
    pub version: Option<String>,
    /// Severity derived from the rule table.
    pub classification: Classification,
    /// Human-readable explanation or remediation.
    pub message: String,
}

impl CheckResult {
    /// Create a result.
    pub fn new(
        library: impl Into<String>,
        version: Option<String>,
        classification: Classification,
        message: impl Into<String>,
    ) -> Self {
        Self {
            library: library.into(),
            version,
            classification,
            message: message.into(),
        }
    }

    /// Whether the checked dependency was found.
    pub fn is_installed(&self) -> bool {
        self.version.is_some()
    }

    /// Convert a non-OK result into the matching error.
    ///
    /// Missing dependencies become [`VskitError::ProbeNotFound`], everything
    /// else [`VskitError::VersionMismatch`]. OK results yield `None`.
    pub fn to_error(&self) -> Option<VskitError> {
        if self.classification == Classification::Ok {
            return None;
        }
        Some(match &self.version {
            None => VskitError::ProbeNotFound {
                library: self.library.clone(),
                message: self.message.clone(),
            },
            Some(version) => VskitError::VersionMismatch {
                library: self.library.clone(),
                version: version.clone(),
                severity: self.classification,
                message: self.message.clone(),
            },
        })
    }
}

/// Ordered collection of check results.
///
/// Reports are built once per run and merged by the caller; individual
/// results are never modified after they are added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    results: Vec<CheckResult>,
}

impl CheckReport {
    /// Create a report from results in check order.
    pub fn new(results: Vec<CheckResult>) -> Self {
        Self { results }
    }

    /// All results in check order.
    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    /// Whether the report holds no results.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Overall status: the worst classification present.
    pub fn status(&self) -> Classification {
        aggregate(self.results.iter().map(|r| r.classification))
    }

    /// Results classified ERROR.
    pub fn errors(&self) -> impl Iterator<Item = &CheckResult> {
        self.with(Classification::Error)
    }

    /// Results classified WARN.
    pub fn warnings(&self) -> impl Iterator<Item = &CheckResult> {
        self.with(Classification::Warn)
    }

    fn with(&self, classification: Classification) -> impl Iterator<Item = &CheckResult> {
        self.results
            .iter()
            .filter(move |r| r.classification == classification)
    }

    /// Append another report's results after this one's.
    pub fn merge(mut self, other: CheckReport) -> Self {
        self.results.extend(other.results);
        self
    }

    /// Fail with the first ERROR result, if any.
    pub fn ensure_ok(&self) -> Result<()> {
        match self.errors().next().and_then(CheckResult::to_error) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl FromIterator<CheckResult> for CheckReport {
    fn from_iter<T: IntoIterator<Item = CheckResult>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
