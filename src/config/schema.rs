//! Configuration schema definitions.
//!
//! These structs map one-to-one onto the YAML config file. Every field is
//! optional; an empty file yields the built-in behavior.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::requirements::{Application, ApplicationLocator, Classification};

/// Default interpreter used for probes and pip.
pub const DEFAULT_PYTHON: &str = "python";

/// Default transcoder binary.
pub const DEFAULT_FFMPEG: &str = "ffmpeg";

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VskitConfig {
    /// Interpreter for version probes and package installs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python: Option<String>,

    /// Transcoder binary (name on PATH or full path)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ffmpeg: Option<String>,

    /// Extra install locations for desktop applications
    pub applications: ApplicationPaths,

    /// Compatibility rules evaluated before the built-in table
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<RuleConfig>,

    /// Launcher script settings
    pub launcher: LauncherConfig,
}

impl VskitConfig {
    /// Interpreter to run, falling back to `python`.
    pub fn python_command(&self) -> &str {
        self.python.as_deref().unwrap_or(DEFAULT_PYTHON)
    }

    /// Transcoder to run, falling back to `ffmpeg`.
    pub fn ffmpeg_command(&self) -> &str {
        self.ffmpeg.as_deref().unwrap_or(DEFAULT_FFMPEG)
    }

    /// Application locator with configured paths tried before the defaults.
    pub fn application_locator(&self) -> ApplicationLocator {
        Application::ALL
            .iter()
            .fold(ApplicationLocator::new(), |locator, &app| {
                let mut candidates: Vec<PathBuf> = self
                    .applications
                    .for_app(app)
                    .iter()
                    .map(|p| expand_home(p))
                    .collect();
                if candidates.is_empty() {
                    return locator;
                }
                candidates.extend(app.default_paths());
                locator.with_candidates(app, candidates)
            })
    }
}

/// Per-application install paths.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationPaths {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub svp4: Vec<PathBuf>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub potplayer: Vec<PathBuf>,
}

impl ApplicationPaths {
    /// Configured paths for `app`.
    pub fn for_app(&self, app: Application) -> &[PathBuf] {
        match app {
            Application::Svp4 => &self.svp4,
            Application::PotPlayer => &self.potplayer,
        }
    }
}

/// A user-supplied compatibility rule.
///
/// Exactly one of `prefix` and `contains` must be set; the validator
/// enforces this before the rule is converted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Library key (python, numpy, torch, vapoursynth)
    pub library: String,

    /// Match versions starting with this string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Match versions containing this string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,

    /// Severity when the rule matches
    pub classification: Classification,

    /// Message shown when the rule matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Launcher script settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Where to write the script
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Virtual environment to activate before launching
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venv: Option<PathBuf>,
}

/// Replace a leading `~` with the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_is_default() {
        let config: VskitConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, VskitConfig::default());
        assert_eq!(config.python_command(), "python");
        assert_eq!(config.ffmpeg_command(), "ffmpeg");
    }

    #[test]
    fn parses_full_config() {
        let yaml = r#"
python: py
ffmpeg: /opt/ffmpeg/bin/ffmpeg
applications:
  svp4: ["D:\\Apps\\SVP 4\\SVPManager.exe"]
rules:
  - library: numpy
    prefix: "1.25"
    classification: warn
    message: NumPy 1.25 is untested
launcher:
  venv: /envs/vs
"#;
        let config: VskitConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.python_command(), "py");
        assert_eq!(config.ffmpeg_command(), "/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(config.applications.svp4.len(), 1);
        assert!(config.applications.potplayer.is_empty());
        assert_eq!(config.rules[0].classification, Classification::Warn);
        assert_eq!(config.rules[0].prefix.as_deref(), Some("1.25"));
        assert_eq!(config.launcher.venv, Some(PathBuf::from("/envs/vs")));
    }

    #[test]
    fn unknown_classification_is_rejected() {
        let yaml = r#"
rules:
  - library: numpy
    prefix: "1."
    classification: fatal
"#;
        assert!(serde_yaml::from_str::<VskitConfig>(yaml).is_err());
    }

    #[test]
    fn configured_paths_come_before_defaults() {
        let config = VskitConfig {
            applications: ApplicationPaths {
                svp4: vec![PathBuf::from("/custom/SVPManager.exe")],
                potplayer: vec![],
            },
            ..Default::default()
        };
        let locator = config.application_locator();

        let svp4 = locator.candidates(Application::Svp4);
        assert_eq!(svp4[0], PathBuf::from("/custom/SVPManager.exe"));
        assert!(svp4.len() > 1);
        assert_eq!(
            locator.candidates(Application::PotPlayer),
            Application::PotPlayer.default_paths().as_slice()
        );
    }

    #[test]
    fn expand_home_leaves_absolute_paths() {
        assert_eq!(
            expand_home(Path::new("/tmp/launch.bat")),
            PathBuf::from("/tmp/launch.bat")
        );
    }

    #[test]
    fn expand_home_replaces_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                expand_home(Path::new("~/Desktop/x.bat")),
                home.join("Desktop/x.bat")
            );
        }
    }
}
