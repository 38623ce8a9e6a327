//! Desktop application detection.
//!
//! SVP4 and PotPlayer are not Python packages, so they are located by
//! checking well-known install paths. Both are optional for the Python
//! environment itself; a missing application is a warning.

use std::fmt;
use std::path::PathBuf;

use super::status::{CheckReport, CheckResult, Classification};
use crate::convert::FFMPEG_DOWNLOAD_URL;
use crate::shell::resolve_tool_path;

/// An application the playback setup relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Application {
    /// SVP4 Manager, drives frame interpolation scripts.
    Svp4,
    /// PotPlayer, hosts the VapourSynth filter.
    PotPlayer,
}

impl Application {
    /// All known applications, in check order.
    pub const ALL: [Application; 2] = [Application::Svp4, Application::PotPlayer];

    /// Config key.
    pub fn key(&self) -> &'static str {
        match self {
            Application::Svp4 => "svp4",
            Application::PotPlayer => "potplayer",
        }
    }

    /// Display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Application::Svp4 => "SVP4",
            Application::PotPlayer => "PotPlayer",
        }
    }

    /// Where to download it.
    pub fn download_url(&self) -> &'static str {
        match self {
            Application::Svp4 => "https://www.svp-team.com/",
            Application::PotPlayer => "https://potplayer.daum.net/",
        }
    }

    /// Standard install locations.
    pub fn default_paths(&self) -> Vec<PathBuf> {
        let paths: &[&str] = match self {
            Application::Svp4 => &[
                r"C:\Program Files (x86)\SVP 4\SVPManager.exe",
                r"C:\Program Files\SVP 4\SVPManager.exe",
            ],
            Application::PotPlayer => &[
                r"C:\Program Files\DAUM\PotPlayer\PotPlayerMini64.exe",
                r"C:\Program Files (x86)\DAUM\PotPlayer\PotPlayerMini64.exe",
            ],
        };
        paths.iter().map(PathBuf::from).collect()
    }
}

impl fmt::Display for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Finds applications by probing candidate paths in order.
#[derive(Debug, Clone)]
pub struct ApplicationLocator {
    svp4: Vec<PathBuf>,
    potplayer: Vec<PathBuf>,
}

impl Default for ApplicationLocator {
    fn default() -> Self {
        Self {
            svp4: Application::Svp4.default_paths(),
            potplayer: Application::PotPlayer.default_paths(),
        }
    }
}

impl ApplicationLocator {
    /// Locator using the standard install paths.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the candidate paths for one application.
    pub fn with_candidates(mut self, app: Application, candidates: Vec<PathBuf>) -> Self {
        match app {
            Application::Svp4 => self.svp4 = candidates,
            Application::PotPlayer => self.potplayer = candidates,
        }
        self
    }

    /// Candidate paths for `app`, in probe order.
    pub fn candidates(&self, app: Application) -> &[PathBuf] {
        match app {
            Application::Svp4 => &self.svp4,
            Application::PotPlayer => &self.potplayer,
        }
    }

    /// First candidate that exists as a file.
    pub fn locate(&self, app: Application) -> Option<PathBuf> {
        self.candidates(app)
            .iter()
            .find(|p| p.is_file())
            .cloned()
    }

    /// Check one application.
    pub fn check(&self, app: Application) -> CheckResult {
        match self.locate(app) {
            Some(path) => CheckResult::new(
                app.display_name(),
                Some(path.display().to_string()),
                Classification::Ok,
                format!("found at {}", path.display()),
            ),
            None => {
                tracing::debug!("{} not found in {:?}", app, self.candidates(app));
                CheckResult::new(
                    app.display_name(),
                    None,
                    Classification::Warn,
                    format!("{} not found (download from {})", app, app.download_url()),
                )
            }
        }
    }

    /// Check every known application.
    pub fn check_all(&self) -> CheckReport {
        Application::ALL.iter().map(|app| self.check(*app)).collect()
    }
}

/// Check that the transcoder used by `convert` can be found.
///
/// `ffmpeg` may be a bare name (searched in `path_entries`) or a path.
pub fn check_transcoder(ffmpeg: &str, path_entries: &[PathBuf]) -> CheckResult {
    match resolve_tool_path(ffmpeg, path_entries) {
        Some(path) => CheckResult::new(
            "ffmpeg",
            Some(path.display().to_string()),
            Classification::Ok,
            format!("found at {}", path.display()),
        ),
        None => CheckResult::new(
            "ffmpeg",
            None,
            Classification::Warn,
            format!(
                "{} not found; video and audio conversion unavailable (download from {})",
                ffmpeg, FFMPEG_DOWNLOAD_URL
            ),
        ),
    }
}
