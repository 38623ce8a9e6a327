//! Ordered compatibility rules.
//!
//! A [`RuleTable`] is evaluated top to bottom and the first rule whose
//! library and pattern match decides the classification. Known-bad rules are
//! listed before known-good ones, so a version that would also fall through
//! to the generic "untested" fallback is reported with the stricter severity.

use super::library::{Library, TORCH_CU118_INDEX};
use super::status::Classification;

/// How a rule matches a detected version string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionPattern {
    /// Version starts with the given text (`2.` matches `2.0.1`).
    Prefix(String),
    /// Version contains the given text anywhere (`+cu121` matches `2.1.0+cu121`).
    Contains(String),
}

impl VersionPattern {
    /// Whether `version` satisfies this pattern.
    pub fn matches(&self, version: &str) -> bool {
        match self {
            VersionPattern::Prefix(p) => version.starts_with(p.as_str()),
            VersionPattern::Contains(p) => version.contains(p.as_str()),
        }
    }
}

/// One entry of the compatibility table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityRule {
    /// Library the rule applies to.
    pub library: Library,
    /// Version match.
    pub pattern: VersionPattern,
    /// Severity when the rule matches.
    pub classification: Classification,
    /// Explanation or remediation shown to the user.
    pub message: String,
}

impl CompatibilityRule {
    /// Rule that matches a version prefix.
    pub fn prefix(
        library: Library,
        prefix: &str,
        classification: Classification,
        message: impl Into<String>,
    ) -> Self {
        Self {
            library,
            pattern: VersionPattern::Prefix(prefix.to_string()),
            classification,
            message: message.into(),
        }
    }

    /// Rule that matches a substring of the version.
    pub fn contains(
        library: Library,
        needle: &str,
        classification: Classification,
        message: impl Into<String>,
    ) -> Self {
        Self {
            library,
            pattern: VersionPattern::Contains(needle.to_string()),
            classification,
            message: message.into(),
        }
    }

    fn applies(&self, library: Library, version: &str) -> bool {
        self.library == library && self.pattern.matches(version)
    }
}

/// Classification plus message for one version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub classification: Classification,
    pub message: String,
}

/// Immutable, ordered rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<CompatibilityRule>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleTable {
    /// Create a table from rules in evaluation order.
    pub fn new(rules: Vec<CompatibilityRule>) -> Self {
        Self { rules }
    }

    /// The built-in VapourSynth + SVP4 compatibility table.
    pub fn builtin() -> Self {
        use Classification::{Error, Ok};
        use Library::{NumPy, Python, Torch, VapourSynth};

        let cu12 = format!(
            "CUDA 12.x build has compatibility issues; install torch==2.7.0+cu118 --index-url {}",
            TORCH_CU118_INDEX
        );

        Self::new(vec![
            CompatibilityRule::prefix(Python, "3.12", Ok, "Python 3.12"),
            CompatibilityRule::prefix(
                NumPy,
                "2.",
                Error,
                "NumPy 2.x breaks VapourSynth; downgrade with pip install numpy==1.26.4",
            ),
            CompatibilityRule::prefix(NumPy, "1.26", Ok, "NumPy 1.26 (not 2.x)"),
            CompatibilityRule::contains(Torch, "+cu121", Error, cu12.clone()),
            CompatibilityRule::contains(Torch, "+cu122", Error, cu12),
            CompatibilityRule::contains(Torch, "+cu118", Ok, "CUDA 11.8 build"),
            CompatibilityRule::prefix(
                VapourSynth,
                "R73",
                Error,
                "VapourSynth R73/R74 has compatibility issues; downgrade to R72",
            ),
            CompatibilityRule::prefix(
                VapourSynth,
                "R74",
                Error,
                "VapourSynth R73/R74 has compatibility issues; downgrade to R72",
            ),
            CompatibilityRule::prefix(VapourSynth, "R72", Ok, "VapourSynth R72"),
        ])
    }

    /// Built-in table with `extra` rules evaluated first.
    pub fn with_overrides(extra: Vec<CompatibilityRule>) -> Self {
        let mut rules = extra;
        rules.extend(Self::builtin().rules);
        Self::new(rules)
    }

    /// All rules in evaluation order.
    pub fn rules(&self) -> &[CompatibilityRule] {
        &self.rules
    }

    /// First rule matching `library` at `version`.
    pub fn find(&self, library: Library, version: &str) -> Option<&CompatibilityRule> {
        self.rules.iter().find(|r| r.applies(library, version))
    }

    /// Classify a detected version. Unmatched versions are WARN.
    pub fn classify(&self, library: Library, version: &str) -> Verdict {
        match self.find(library, version) {
            Some(rule) => {
                tracing::debug!(
                    "{} {} matched {:?} -> {}",
                    library,
                    version,
                    rule.pattern,
                    rule.classification
                );
                Verdict {
                    classification: rule.classification,
                    message: rule.message.clone(),
                }
            }
            None => {
                tracing::debug!("{} {} matched no rule", library, version);
                Verdict {
                    classification: Classification::Warn,
                    message: format!(
                        "untested version; expected {} ({})",
                        library.pinned_version(),
                        library.install_hint()
                    ),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numpy_two_is_error() {
        let verdict = RuleTable::builtin().classify(Library::NumPy, "2.0.1");
        assert_eq!(verdict.classification, Classification::Error);
        assert!(verdict.message.contains("1.26.4"));
    }

    #[test]
    fn numpy_126_is_ok() {
        let verdict = RuleTable::builtin().classify(Library::NumPy, "1.26.4");
        assert_eq!(verdict.classification, Classification::Ok);
    }

    #[test]
    fn unknown_numpy_is_untested_warning() {
        let verdict = RuleTable::builtin().classify(Library::NumPy, "1.24.0");
        assert_eq!(verdict.classification, Classification::Warn);
        assert!(verdict.message.contains("untested"));
    }

    #[test]
    fn torch_cu121_recommends_cu118() {
        let verdict = RuleTable::builtin().classify(Library::Torch, "2.1.0+cu121");
        assert_eq!(verdict.classification, Classification::Error);
        assert!(verdict.message.contains("cu118"));
    }

    #[test]
    fn torch_cu118_is_ok() {
        let verdict = RuleTable::builtin().classify(Library::Torch, "2.7.0+cu118");
        assert_eq!(verdict.classification, Classification::Ok);
    }

    #[test]
    fn torch_cpu_build_is_warning() {
        let verdict = RuleTable::builtin().classify(Library::Torch, "2.7.0+cpu");
        assert_eq!(verdict.classification, Classification::Warn);
    }

    #[test]
    fn vapoursynth_versions() {
        let table = RuleTable::builtin();
        assert_eq!(
            table.classify(Library::VapourSynth, "R72").classification,
            Classification::Ok
        );
        assert_eq!(
            table.classify(Library::VapourSynth, "R73").classification,
            Classification::Error
        );
        assert_eq!(
            table.classify(Library::VapourSynth, "R70").classification,
            Classification::Warn
        );
    }

    #[test]
    fn vapoursynth_error_message_names_only_matched_releases() {
        let table = RuleTable::builtin();
        for release in ["R73", "R74"] {
            let verdict = table.classify(Library::VapourSynth, release);
            assert_eq!(verdict.classification, Classification::Error);
            assert!(verdict.message.contains("R73/R74"), "{}", verdict.message);
            assert!(!verdict.message.contains("R73+"));
        }

        // Later releases have no rule yet.
        let verdict = table.classify(Library::VapourSynth, "R75");
        assert_eq!(verdict.classification, Classification::Warn);
        assert!(verdict.message.contains("untested"));
    }

    #[test]
    fn python_other_minor_is_warning() {
        let table = RuleTable::builtin();
        assert_eq!(
            table.classify(Library::Python, "3.12.4").classification,
            Classification::Ok
        );
        assert_eq!(
            table.classify(Library::Python, "3.11.9").classification,
            Classification::Warn
        );
    }

    #[test]
    fn rules_do_not_leak_across_libraries() {
        // "2." is a NumPy rule; a Python 2 interpreter is just untested here.
        let verdict = RuleTable::builtin().classify(Library::Python, "2.7.18");
        assert_eq!(verdict.classification, Classification::Warn);
    }

    #[test]
    fn first_match_wins() {
        let table = RuleTable::new(vec![
            CompatibilityRule::prefix(Library::NumPy, "1.2", Classification::Error, "bad"),
            CompatibilityRule::prefix(Library::NumPy, "1.26", Classification::Ok, "good"),
        ]);
        let verdict = table.classify(Library::NumPy, "1.26.4");
        assert_eq!(verdict.classification, Classification::Error);
        assert_eq!(verdict.message, "bad");
    }

    #[test]
    fn known_bad_beats_fallback() {
        // Every cu121 version would otherwise fall through to the untested
        // warning; the explicit rule must win with its stricter severity.
        let table = RuleTable::builtin();
        for version in ["2.1.0+cu121", "2.3.1+cu121", "2.5.0+cu122"] {
            assert_eq!(
                table.classify(Library::Torch, version).classification,
                Classification::Error,
                "{version}"
            );
        }
    }

    #[test]
    fn overrides_are_evaluated_first() {
        let table = RuleTable::with_overrides(vec![CompatibilityRule::prefix(
            Library::NumPy,
            "2.",
            Classification::Warn,
            "tolerated locally",
        )]);
        let verdict = table.classify(Library::NumPy, "2.1.0");
        assert_eq!(verdict.classification, Classification::Warn);
        assert_eq!(verdict.message, "tolerated locally");
        assert_eq!(table.rules().len(), RuleTable::builtin().rules().len() + 1);
    }

    #[test]
    fn pattern_matching() {
        assert!(VersionPattern::Prefix("1.26".into()).matches("1.26.4"));
        assert!(!VersionPattern::Prefix("1.26".into()).matches("0.1.26"));
        assert!(VersionPattern::Contains("+cu118".into()).matches("2.7.0+cu118"));
    }
}
