//! Desktop launcher script.
//!
//! Renders a Windows batch file that optionally activates the virtual
//! environment, starts SVP4, waits for it to come up, then starts PotPlayer
//! and reminds the user to enable the VapourSynth filter.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, VskitError};

/// File name used when no path is configured.
pub const DEFAULT_LAUNCHER_NAME: &str = "Launch_VapourSynth_SVP4.bat";

/// Seconds to wait after starting SVP4.
pub const SVP4_STARTUP_WAIT_SECS: u32 = 5;

/// `~/Desktop/Launch_VapourSynth_SVP4.bat`, if the home directory is known.
pub fn default_launcher_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("Desktop").join(DEFAULT_LAUNCHER_NAME))
}

/// What the launcher should start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LauncherScript {
    /// Located SVP4 executable.
    pub svp4: Option<PathBuf>,
    /// Located PotPlayer executable.
    pub potplayer: Option<PathBuf>,
    /// Virtual environment to activate first.
    pub venv: Option<PathBuf>,
}

impl LauncherScript {
    /// Render the batch file with CRLF line endings.
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = vec![
            "@echo off".into(),
            "echo ============================================".into(),
            "echo VapourSynth + SVP4 Launcher".into(),
            "echo ============================================".into(),
            "echo.".into(),
        ];

        if let Some(venv) = &self.venv {
            let venv = venv.display();
            lines.push("rem Activate virtual environment".into());
            lines.push(format!(r#"call "{}\Scripts\activate.bat""#, venv));
            lines.push(format!(r"set PYTHONPATH={}\Lib\site-packages", venv));
            lines.push(format!(r"set VAPOURSYNTH_PATH={}\Lib\site-packages", venv));
            lines.push(String::new());
        }

        match &self.svp4 {
            Some(svp4) => {
                let svp4 = svp4.display();
                lines.push("rem Start SVP4".into());
                lines.push(format!(r#"if exist "{}" ("#, svp4));
                lines.push("    echo Starting SVP4 Manager...".into());
                lines.push(format!(r#"    start "" "{}""#, svp4));
                lines.push(format!(
                    "    timeout /t {} /nobreak >nul",
                    SVP4_STARTUP_WAIT_SECS
                ));
                lines.push(")".into());
            }
            None => lines.push("rem SVP4 not found; start it manually".into()),
        }
        lines.push(String::new());

        match &self.potplayer {
            Some(player) => {
                let player = player.display();
                lines.push("rem Start PotPlayer".into());
                lines.push(format!(r#"if exist "{}" ("#, player));
                lines.push("    echo Starting PotPlayer...".into());
                lines.push(format!(r#"    start "" "{}""#, player));
                lines.push(")".into());
            }
            None => lines.push("rem PotPlayer not found; start it manually".into()),
        }

        lines.push("echo.".into());
        lines.push("echo Remember: in PotPlayer press F5 - Video - VapourSynth - Enable".into());
        lines.push("echo.".into());
        lines.push("pause".into());

        let mut script = lines.join("\r\n");
        script.push_str("\r\n");
        script
    }
}

/// Writes a rendered launcher to disk.
#[derive(Debug, Clone)]
pub struct LauncherWriter {
    path: PathBuf,
    force: bool,
}

impl LauncherWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            force: false,
        }
    }

    /// Allow replacing an existing file.
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `script`, creating parent directories as needed.
    pub fn write(&self, script: &LauncherScript) -> Result<PathBuf> {
        if self.path.exists() && !self.force {
            return Err(VskitError::AlreadyExists {
                path: self.path.clone(),
            });
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, script.render())?;
        tracing::debug!("Wrote launcher to {}", self.path.display());
        Ok(self.path.clone())
    }
}
