//! Convert command implementation.
//!
//! `vskit convert <INPUT> -o <EXT>` writes the converted file next to the
//! input. `vskit convert --list` prints the format table.

use std::path::Path;

use crate::cli::args::ConvertArgs;
use crate::config::VskitConfig;
use crate::convert::{
    BackendKind, ConversionDispatcher, ConversionError, FormatTable, ImageCodec, ImageCrateCodec,
    Transcoder,
};
use crate::error::Result;
use crate::shell::{ProcessRunner, SystemRunner};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The convert command implementation.
pub struct ConvertCommand {
    config: VskitConfig,
    args: ConvertArgs,
}

impl ConvertCommand {
    pub fn new(config: VskitConfig, args: ConvertArgs) -> Self {
        Self { config, args }
    }

    /// Run against the given backends.
    pub fn run_with(
        &self,
        ui: &mut dyn UserInterface,
        runner: &dyn ProcessRunner,
        images: &dyn ImageCodec,
    ) -> Result<CommandResult> {
        if self.args.list {
            show_formats(ui, &FormatTable::builtin());
            return Ok(CommandResult::success());
        }

        let (Some(input), Some(target)) = (&self.args.input, &self.args.target) else {
            ui.error("convert needs an input file and a target extension (-o EXT)");
            return Ok(CommandResult::failure(2));
        };

        let transcoder = Transcoder::new(self.config.ffmpeg_command(), runner);
        let dispatcher = ConversionDispatcher::new(images, transcoder);

        match self.convert(ui, &dispatcher, input, target) {
            Ok(()) => Ok(CommandResult::success()),
            Err(e) => {
                ui.error(&e.to_string());
                if let ConversionError::UnsupportedConversion { category, .. } = &e {
                    if let Some(spec) = dispatcher.table().spec(*category) {
                        ui.show_hint(&format!(
                            "{} files convert to: {}",
                            category,
                            spec.outputs.join(", ")
                        ));
                    }
                }
                Ok(CommandResult::failure(1))
            }
        }
    }

    fn convert(
        &self,
        ui: &mut dyn UserInterface,
        dispatcher: &ConversionDispatcher<'_>,
        input: &Path,
        target: &str,
    ) -> std::result::Result<(), ConversionError> {
        let plan = dispatcher.plan(input, target)?;

        let mut spinner = ui.start_spinner(&format!(
            "Converting {} ({}) to {}",
            input.display(),
            plan.category,
            plan.target
        ));
        match dispatcher.execute(&plan) {
            Ok(()) => {
                spinner.finish_success(&format!("Saved {}", plan.output.display()));
                Ok(())
            }
            Err(e) => {
                spinner.finish_error(&format!("{} conversion failed", plan.category));
                Err(e)
            }
        }
    }
}

impl Command for ConvertCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        self.run_with(ui, &SystemRunner::new(), &ImageCrateCodec)
    }
}

/// Print each category with its inputs, outputs and backend.
fn show_formats(ui: &mut dyn UserInterface, table: &FormatTable) {
    ui.show_header("Supported formats");
    for spec in table.specs() {
        let backend = match spec.backend {
            BackendKind::Document => "not implemented".to_string(),
            other => other.to_string(),
        };
        ui.message(&format!("{} ({})", spec.category, backend));
        ui.message(&format!("  from: {}", spec.inputs.join(" ")));
        ui.message(&format!("  to:   {}", spec.outputs.join(" ")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::ImagePlan;
    use crate::shell::MockRunner;
    use crate::ui::MockUI;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct NoopCodec;

    impl ImageCodec for NoopCodec {
        fn convert(&self, _: &Path, output: &Path, _: &ImagePlan) -> anyhow::Result<()> {
            fs::write(output, b"converted")?;
            Ok(())
        }
    }

    fn args(input: &Path, target: &str) -> ConvertArgs {
        ConvertArgs {
            input: Some(input.to_path_buf()),
            target: Some(target.to_string()),
            list: false,
        }
    }

    #[test]
    fn list_prints_every_category() {
        let cmd = ConvertCommand::new(
            VskitConfig::default(),
            ConvertArgs {
                list: true,
                ..Default::default()
            },
        );
        let mut ui = MockUI::new();
        let result = cmd.run_with(&mut ui, &MockRunner::new(), &NoopCodec).unwrap();

        assert!(result.success);
        for name in ["image", "video", "audio", "document (not implemented)"] {
            assert!(ui.has_message(name), "{name}");
        }
    }

    #[test]
    fn image_conversion_reports_output() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("photo.png");
        fs::write(&input, "png").unwrap();

        let cmd = ConvertCommand::new(VskitConfig::default(), args(&input, "jpg"));
        let mut ui = MockUI::new();
        let result = cmd.run_with(&mut ui, &MockRunner::new(), &NoopCodec).unwrap();

        assert!(result.success);
        assert!(temp.path().join("photo.jpg").exists());
        assert!(ui.spinner_outcomes()[0].contains("photo.jpg"));
    }

    #[test]
    fn uses_configured_ffmpeg() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("song.flac");
        fs::write(&input, "flac").unwrap();
        let config = VskitConfig {
            ffmpeg: Some("/opt/ffmpeg/bin/ffmpeg".to_string()),
            ..Default::default()
        };

        let runner = MockRunner::new();
        let cmd = ConvertCommand::new(config, args(&input, ".mp3"));
        cmd.run_with(&mut MockUI::new(), &runner, &NoopCodec).unwrap();

        let calls = runner.calls();
        assert_eq!(calls[0].program, "/opt/ffmpeg/bin/ffmpeg");
        assert!(calls[0].args.contains(&"-vn".to_string()));
    }

    #[test]
    fn unsupported_conversion_exits_1_with_hint() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("photo.jpg");
        fs::write(&input, "jpg").unwrap();

        let cmd = ConvertCommand::new(VskitConfig::default(), args(&input, ".mp3"));
        let mut ui = MockUI::new();
        let result = cmd.run_with(&mut ui, &MockRunner::new(), &NoopCodec).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("Cannot convert image to .mp3"));
        assert!(ui.has_hint(".png"));
    }

    #[test]
    fn ffmpeg_failure_is_reported_verbatim() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("clip.mp4");
        fs::write(&input, "mp4").unwrap();

        let mut runner = MockRunner::new();
        runner.respond("ffmpeg", MockRunner::fail(1, "clip.mp4: Invalid data found"));
        let cmd = ConvertCommand::new(VskitConfig::default(), args(&input, "gif"));
        let mut ui = MockUI::new();
        let result = cmd.run_with(&mut ui, &runner, &NoopCodec).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("ffmpeg failed: clip.mp4: Invalid data found"));
        assert!(ui.spinner_outcomes()[0].starts_with("error:"));
    }

    #[test]
    fn missing_input_exits_1() {
        let cmd = ConvertCommand::new(
            VskitConfig::default(),
            args(&PathBuf::from("/nonexistent/clip.mp4"), "gif"),
        );
        let mut ui = MockUI::new();
        let result = cmd.run_with(&mut ui, &MockRunner::new(), &NoopCodec).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("Input file not found"));
        assert!(ui.spinners().is_empty());
    }
}
