//! Check command implementation.

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::args::CheckArgs;
use crate::config::{rule_table, VskitConfig};
use crate::error::Result;
use crate::requirements::{
    check_transcoder, CheckReport, CheckResult, Classification, LibraryProbe, PythonProbe,
    VersionChecker,
};
use crate::shell::{parse_system_path, SystemRunner};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// JSON shape of `vskit check --json`.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    status: Classification,
    results: &'a [CheckResult],
}

/// The check command implementation.
pub struct CheckCommand {
    config: VskitConfig,
    args: CheckArgs,
}

impl CheckCommand {
    pub fn new(config: VskitConfig, args: CheckArgs) -> Self {
        Self { config, args }
    }

    /// Build the full report against the given probe.
    pub fn report(
        &self,
        probe: &dyn LibraryProbe,
        path_entries: &[PathBuf],
    ) -> Result<CheckReport> {
        let checker = VersionChecker::new(rule_table(&self.config)?);
        let mut report = checker.run(probe);

        if !self.args.packages_only {
            report = report
                .merge(self.config.application_locator().check_all())
                .merge(CheckReport::new(vec![check_transcoder(
                    self.config.ffmpeg_command(),
                    path_entries,
                )]));
        }
        Ok(report)
    }

    /// Run against the given probe and PATH.
    pub fn run_with(
        &self,
        ui: &mut dyn UserInterface,
        probe: &dyn LibraryProbe,
        path_entries: &[PathBuf],
    ) -> Result<CommandResult> {
        let report = self.report(probe, path_entries)?;
        tracing::debug!(
            "Check finished: {} result(s), status {}",
            report.results().len(),
            report.status()
        );

        if self.args.json {
            let json = serde_json::to_string_pretty(&JsonReport {
                status: report.status(),
                results: report.results(),
            })
            .map_err(|e| anyhow::anyhow!("Failed to serialize report: {}", e))?;
            ui.message(&json);
        } else {
            ui.show_header(&format!(
                "Checking VapourSynth environment ({})",
                self.config.python_command()
            ));
            ui.show_report(&report);
            if report.status() == Classification::Error {
                ui.show_hint("Run `vskit install` to install the known-good versions");
            }
        }

        match report.status() {
            Classification::Error => Ok(CommandResult::failure(1)),
            _ => Ok(CommandResult::success()),
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let runner = SystemRunner::new();
        let probe = PythonProbe::new(self.config.python_command(), &runner);
        self.run_with(ui, &probe, &parse_system_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConfig;
    use crate::requirements::{Library, MockProbe};
    use crate::ui::{MockUI, OutputMode};

    fn packages_only() -> CheckArgs {
        CheckArgs {
            json: false,
            packages_only: true,
        }
    }

    #[test]
    fn healthy_environment_succeeds() {
        let cmd = CheckCommand::new(VskitConfig::default(), packages_only());
        let mut ui = MockUI::new();
        let result = cmd.run_with(&mut ui, &MockProbe::healthy(), &[]).unwrap();

        assert!(result.success);
        assert!(ui.has_success("Overall: OK"));
        assert!(ui.errors().is_empty());
        assert_eq!(ui.headers().len(), 1);
    }

    #[test]
    fn numpy_2_fails_with_install_hint() {
        let probe = MockProbe::healthy().with_version(Library::NumPy, "2.1.0");
        let cmd = CheckCommand::new(VskitConfig::default(), packages_only());
        let mut ui = MockUI::new();
        let result = cmd.run_with(&mut ui, &probe, &[]).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("NumPy 2.1.0"));
        assert!(ui.has_error("Overall: ERROR"));
        assert!(ui.has_hint("vskit install"));
    }

    #[test]
    fn applications_and_ffmpeg_are_checked_by_default() {
        let cmd = CheckCommand::new(VskitConfig::default(), CheckArgs::default());
        let report = cmd.report(&MockProbe::healthy(), &[]).unwrap();

        let names: Vec<_> = report.results().iter().map(|r| r.library.as_str()).collect();
        assert!(names.contains(&"ffmpeg"));
        assert_eq!(report.results().last().map(|r| r.library.as_str()), Some("ffmpeg"));
        // Missing apps and ffmpeg only warn.
        assert!(report.status() <= Classification::Warn);
    }

    #[test]
    fn packages_only_skips_applications() {
        let cmd = CheckCommand::new(VskitConfig::default(), packages_only());
        let report = cmd.report(&MockProbe::healthy(), &[]).unwrap();
        assert!(report.results().iter().all(|r| r.library != "ffmpeg"));
    }

    #[test]
    fn user_rule_applies() {
        let config = VskitConfig {
            rules: vec![RuleConfig {
                library: "vapoursynth".to_string(),
                prefix: Some("R72".to_string()),
                contains: None,
                classification: Classification::Error,
                message: Some("R72 crashes with my plugins".to_string()),
            }],
            ..Default::default()
        };
        let cmd = CheckCommand::new(config, packages_only());
        let mut ui = MockUI::new();
        let result = cmd.run_with(&mut ui, &MockProbe::healthy(), &[]).unwrap();

        assert!(!result.success);
        assert!(ui.has_error("R72 crashes with my plugins"));
    }

    #[test]
    fn json_output_is_parseable() {
        let args = CheckArgs {
            json: true,
            packages_only: true,
        };
        let cmd = CheckCommand::new(VskitConfig::default(), args);
        let mut ui = MockUI::new();
        cmd.run_with(&mut ui, &MockProbe::healthy(), &[]).unwrap();

        assert_eq!(ui.messages().len(), 1);
        let value: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(value["status"], "ok");
        assert!(value["results"].as_array().unwrap().len() >= 4);
        assert!(ui.headers().is_empty());
    }

    #[test]
    fn quiet_mode_hides_ok_lines() {
        let cmd = CheckCommand::new(VskitConfig::default(), packages_only());
        let mut ui = MockUI::with_mode(OutputMode::Quiet);
        cmd.run_with(&mut ui, &MockProbe::healthy(), &[]).unwrap();

        assert_eq!(ui.successes().len(), 1);
        assert!(ui.has_success("Overall"));
    }
}
