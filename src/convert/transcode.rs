//! `ffmpeg` transcoding backend.

use std::path::Path;

use crate::error::VskitError;
use crate::shell::{format_command, ProcessRunner};

use super::error::ConversionError;
use super::formats::{BackendKind, Category};

/// Where to get ffmpeg when it is missing.
pub const FFMPEG_DOWNLOAD_URL: &str = "https://ffmpeg.org";

/// Filter chain for animated-image output.
pub const ANIMATED_IMAGE_FILTER: &str = "fps=10,scale=320:-1:flags=lanczos";

/// Argument template, chosen per category and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscodeTemplate {
    /// Plain container/codec conversion.
    Generic,
    /// Audio output; video and cover-art streams are dropped.
    Audio,
    /// Animated GIF with reduced frame rate and width.
    AnimatedImage,
}

impl TranscodeTemplate {
    /// Select the template for a conversion.
    pub fn select(category: Category, target: &str) -> Self {
        if target == ".gif" {
            TranscodeTemplate::AnimatedImage
        } else if category == Category::Audio {
            TranscodeTemplate::Audio
        } else {
            TranscodeTemplate::Generic
        }
    }

    /// Build the ffmpeg argument list.
    pub fn args(&self, input: &Path, output: &Path) -> Vec<String> {
        let input = input.display().to_string();
        let output = output.display().to_string();
        let mut args = vec!["-i".to_string(), input];
        match self {
            TranscodeTemplate::Generic => {}
            TranscodeTemplate::Audio => args.push("-vn".to_string()),
            TranscodeTemplate::AnimatedImage => args.extend(
                ["-vf", ANIMATED_IMAGE_FILTER, "-c:v", "gif", "-f", "gif"]
                    .iter()
                    .map(|s| s.to_string()),
            ),
        }
        args.push(output);
        args.push("-y".to_string());
        args
    }
}

/// Runs ffmpeg through a [`ProcessRunner`].
pub struct Transcoder<'a> {
    ffmpeg: String,
    runner: &'a dyn ProcessRunner,
}

impl<'a> Transcoder<'a> {
    /// Create a transcoder invoking `ffmpeg` (name on PATH or a full path).
    pub fn new(ffmpeg: &str, runner: &'a dyn ProcessRunner) -> Self {
        Self {
            ffmpeg: ffmpeg.to_string(),
            runner,
        }
    }

    /// Convert `input` into `output` using `template`.
    ///
    /// A non-zero exit is reported with ffmpeg's stderr verbatim.
    pub fn transcode(
        &self,
        template: TranscodeTemplate,
        input: &Path,
        output: &Path,
    ) -> Result<(), ConversionError> {
        let args = template.args(input, output);
        tracing::debug!("Transcoding: {}", format_command(&self.ffmpeg, &args));

        let backend = BackendKind::Transcoder.to_string();
        let result = self.runner.run(&self.ffmpeg, &args).map_err(|e| match e {
            VskitError::CommandNotFound { .. } => ConversionError::BackendFailure {
                backend: backend.clone(),
                diagnostic: format!(
                    "{} not installed. Download from {}",
                    self.ffmpeg, FFMPEG_DOWNLOAD_URL
                ),
            },
            other => ConversionError::BackendFailure {
                backend: backend.clone(),
                diagnostic: other.to_string(),
            },
        })?;

        if result.success {
            Ok(())
        } else {
            Err(ConversionError::BackendFailure {
                backend,
                diagnostic: result.stderr,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockRunner;
    use std::path::PathBuf;

    #[test]
    fn gif_target_selects_animated_template() {
        assert_eq!(
            TranscodeTemplate::select(Category::Video, ".gif"),
            TranscodeTemplate::AnimatedImage
        );
        assert_eq!(
            TranscodeTemplate::select(Category::Video, ".webm"),
            TranscodeTemplate::Generic
        );
        assert_eq!(
            TranscodeTemplate::select(Category::Audio, ".ogg"),
            TranscodeTemplate::Audio
        );
    }

    #[test]
    fn generic_args() {
        let args = TranscodeTemplate::Generic.args(Path::new("in.mkv"), Path::new("in.mp4"));
        assert_eq!(args, vec!["-i", "in.mkv", "in.mp4", "-y"]);
    }

    #[test]
    fn animated_image_args() {
        let args =
            TranscodeTemplate::AnimatedImage.args(Path::new("clip.mp4"), Path::new("clip.gif"));
        assert_eq!(
            args,
            vec![
                "-i",
                "clip.mp4",
                "-vf",
                ANIMATED_IMAGE_FILTER,
                "-c:v",
                "gif",
                "-f",
                "gif",
                "clip.gif",
                "-y"
            ]
        );
    }

    #[test]
    fn audio_args_drop_video() {
        let args = TranscodeTemplate::Audio.args(Path::new("a.flac"), Path::new("a.mp3"));
        assert_eq!(args, vec!["-i", "a.flac", "-vn", "a.mp3", "-y"]);
    }

    #[test]
    fn nonzero_exit_is_backend_failure_with_stderr() {
        let mut runner = MockRunner::new();
        runner.respond("ffmpeg", MockRunner::fail(1, "moov atom not found"));
        let transcoder = Transcoder::new("ffmpeg", &runner);

        let err = transcoder
            .transcode(
                TranscodeTemplate::Generic,
                &PathBuf::from("bad.mp4"),
                &PathBuf::from("bad.mov"),
            )
            .unwrap_err();
        assert_eq!(
            err,
            ConversionError::BackendFailure {
                backend: "ffmpeg".to_string(),
                diagnostic: "moov atom not found".to_string(),
            }
        );
        assert_eq!(runner.call_count(), 1);
    }

    #[test]
    fn missing_ffmpeg_points_to_download() {
        let mut runner = MockRunner::new();
        runner.missing("ffmpeg");
        let transcoder = Transcoder::new("ffmpeg", &runner);

        let err = transcoder
            .transcode(
                TranscodeTemplate::Generic,
                Path::new("a.avi"),
                Path::new("a.mp4"),
            )
            .unwrap_err();
        assert!(err.to_string().contains(FFMPEG_DOWNLOAD_URL));
    }
}
