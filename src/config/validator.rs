//! Configuration validation.
//!
//! All problems are collected so the user can fix them in one pass, then
//! folded into a single [`VskitError::ConfigValidationError`].

use crate::config::schema::{RuleConfig, VskitConfig};
use crate::error::{Result, VskitError};
use crate::requirements::{CompatibilityRule, Library, RuleTable, VersionPattern};

/// One validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Index into `rules:` if the problem is rule-specific
    pub index: Option<usize>,
}

/// Collect every validation problem in `config`.
pub fn validate_config(config: &VskitConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (key, value) in [("python", &config.python), ("ffmpeg", &config.ffmpeg)] {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            errors.push(ValidationError {
                rule: "empty-command".to_string(),
                message: format!("'{}' must not be empty", key),
                index: None,
            });
        }
    }

    for (index, rule) in config.rules.iter().enumerate() {
        errors.extend(validate_rule(index, rule));
    }

    errors
}

fn validate_rule(index: usize, rule: &RuleConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut push = |id: &str, message: String| {
        errors.push(ValidationError {
            rule: id.to_string(),
            message: format!("rules[{}]: {}", index, message),
            index: Some(index),
        })
    };

    if let Err(e) = rule.library.parse::<Library>() {
        push("unknown-library", e);
    }

    match (&rule.prefix, &rule.contains) {
        (Some(_), Some(_)) => push(
            "ambiguous-pattern",
            "set either 'prefix' or 'contains', not both".to_string(),
        ),
        (None, None) => push(
            "missing-pattern",
            "one of 'prefix' or 'contains' is required".to_string(),
        ),
        (Some(p), None) | (None, Some(p)) if p.is_empty() => {
            push("empty-pattern", "pattern must not be empty".to_string())
        }
        _ => {}
    }

    errors
}

/// Validate `config`, failing on the first batch of problems.
pub fn validate(config: &VskitConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    Err(VskitError::ConfigValidationError { message })
}

/// Convert one validated rule.
pub fn to_compatibility_rule(rule: &RuleConfig) -> Result<CompatibilityRule> {
    let library: Library = rule
        .library
        .parse()
        .map_err(|message| VskitError::ConfigValidationError { message })?;

    let pattern = match (&rule.prefix, &rule.contains) {
        (Some(p), None) => VersionPattern::Prefix(p.clone()),
        (None, Some(c)) => VersionPattern::Contains(c.clone()),
        _ => {
            return Err(VskitError::ConfigValidationError {
                message: format!("rule for {} needs exactly one pattern", library),
            })
        }
    };

    let message = rule
        .message
        .clone()
        .unwrap_or_else(|| format!("matched user rule ({})", rule.classification));

    Ok(CompatibilityRule {
        library,
        pattern,
        classification: rule.classification,
        message,
    })
}

/// Rule table with the configured rules ahead of the built-ins.
pub fn rule_table(config: &VskitConfig) -> Result<RuleTable> {
    let extra = config
        .rules
        .iter()
        .map(to_compatibility_rule)
        .collect::<Result<Vec<_>>>()?;
    Ok(RuleTable::with_overrides(extra))
}
