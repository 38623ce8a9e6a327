//! Integration tests for the conversion API.

use std::fs;
use tempfile::TempDir;
use vskit::convert::{
    output_path, Category, ConversionDispatcher, ConversionError, FormatTable, ImageCrateCodec,
    Transcoder,
};
use vskit::shell::MockRunner;

#[test]
fn every_category_is_declared() {
    let table = FormatTable::builtin();
    let categories: Vec<_> = table.specs().iter().map(|s| s.category).collect();
    assert_eq!(
        categories,
        [
            Category::Image,
            Category::Video,
            Category::Audio,
            Category::Document
        ]
    );
    assert_eq!(table.detect(".M4A"), Some(Category::Audio));
    assert_eq!(table.detect("heic"), None);
}

#[test]
fn output_lands_next_to_input() {
    let out = output_path(std::path::Path::new("/media/Clip.Final.mkv"), ".webm");
    assert_eq!(out, std::path::PathBuf::from("/media/Clip.Final.webm"));
}

#[test]
fn video_to_gif_uses_animated_filter() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("clip.mov");
    fs::write(&input, "mov").unwrap();

    let runner = MockRunner::new();
    let transcoder = Transcoder::new("ffmpeg", &runner);
    let dispatcher = ConversionDispatcher::new(&ImageCrateCodec, transcoder);
    let output = dispatcher.convert(&input, "GIF").unwrap();

    assert_eq!(output, temp.path().join("clip.gif"));
    let call = &runner.calls()[0];
    assert!(call.args.iter().any(|a| a.contains("fps=10")));
    assert!(call.args.contains(&output.display().to_string()));
}

#[test]
fn missing_ffmpeg_names_download_site() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("song.wav");
    fs::write(&input, "wav").unwrap();

    let mut runner = MockRunner::new();
    runner.missing("ffmpeg");
    let transcoder = Transcoder::new("ffmpeg", &runner);
    let dispatcher = ConversionDispatcher::new(&ImageCrateCodec, transcoder);
    let err = dispatcher.convert(&input, ".mp3").unwrap_err();

    match err {
        ConversionError::BackendFailure { diagnostic, .. } => {
            assert!(diagnostic.contains("ffmpeg.org"));
        }
        other => panic!("expected backend failure, got {other:?}"),
    }
}

#[test]
fn corrupt_image_is_a_backend_failure() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("broken.png");
    fs::write(&input, "not a png").unwrap();

    let runner = MockRunner::new();
    let transcoder = Transcoder::new("ffmpeg", &runner);
    let dispatcher = ConversionDispatcher::new(&ImageCrateCodec, transcoder);
    let err = dispatcher.convert(&input, ".bmp").unwrap_err();

    assert!(matches!(err, ConversionError::BackendFailure { .. }));
    assert!(err.to_string().contains("broken.png"));
    assert_eq!(runner.call_count(), 0);
}
