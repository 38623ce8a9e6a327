//! Format table: which extensions each category accepts and produces.

use std::fmt;
use std::path::Path;

use serde::Serialize;

/// A format family with its own input/output extension sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Image,
    Video,
    Audio,
    Document,
}

impl Category {
    /// Lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Image => "image",
            Category::Video => "video",
            Category::Audio => "audio",
            Category::Document => "document",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which engine performs conversions for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// In-process image codec.
    ImageCodec,
    /// External `ffmpeg` process.
    Transcoder,
    /// Declared but not built.
    Document,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BackendKind::ImageCodec => "image codec",
            BackendKind::Transcoder => "ffmpeg",
            BackendKind::Document => "document converter",
        };
        f.write_str(name)
    }
}

/// Accepted extensions and backend for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatSpec {
    pub category: Category,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub backend: BackendKind,
}

impl FormatSpec {
    fn new(category: Category, inputs: &[&str], outputs: &[&str], backend: BackendKind) -> Self {
        Self {
            category,
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
            backend,
        }
    }

    /// Whether `extension` (normalized) is an accepted input.
    pub fn accepts_input(&self, extension: &str) -> bool {
        self.inputs.iter().any(|e| e == extension)
    }

    /// Whether `extension` (normalized) is an accepted output.
    pub fn accepts_output(&self, extension: &str) -> bool {
        self.outputs.iter().any(|e| e == extension)
    }
}

/// Read-only mapping from category to its [`FormatSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatTable {
    specs: Vec<FormatSpec>,
}

impl Default for FormatTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FormatTable {
    /// The built-in table.
    pub fn builtin() -> Self {
        Self {
            specs: vec![
                FormatSpec::new(
                    Category::Image,
                    &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".webp", ".svg"],
                    &[".jpg", ".png", ".pdf", ".webp", ".bmp", ".ico"],
                    BackendKind::ImageCodec,
                ),
                FormatSpec::new(
                    Category::Video,
                    &[".mp4", ".avi", ".mov", ".wmv", ".flv", ".mkv", ".webm"],
                    &[".mp4", ".avi", ".mov", ".webm", ".gif"],
                    BackendKind::Transcoder,
                ),
                FormatSpec::new(
                    Category::Audio,
                    &[".mp3", ".wav", ".flac", ".aac", ".ogg", ".wma", ".m4a"],
                    &[".mp3", ".wav", ".flac", ".aac", ".ogg"],
                    BackendKind::Transcoder,
                ),
                FormatSpec::new(
                    Category::Document,
                    &[".docx", ".pdf", ".txt", ".rtf", ".odt", ".html", ".md"],
                    &[".pdf", ".html", ".txt", ".md"],
                    BackendKind::Document,
                ),
            ],
        }
    }

    /// All categories in table order.
    pub fn specs(&self) -> &[FormatSpec] {
        &self.specs
    }

    /// Spec for `category`.
    pub fn spec(&self, category: Category) -> Option<&FormatSpec> {
        self.specs.iter().find(|s| s.category == category)
    }

    /// Category claiming `extension` as input. Case-insensitive; the leading
    /// dot is optional.
    pub fn detect(&self, extension: &str) -> Option<Category> {
        let ext = normalize_extension(extension);
        self.specs
            .iter()
            .find(|s| s.accepts_input(&ext))
            .map(|s| s.category)
    }

    /// Category of the file at `path`, by extension.
    pub fn detect_path(&self, path: &Path) -> Option<Category> {
        extension_of(path).and_then(|ext| self.detect(&ext))
    }
}

/// Lowercase an extension and ensure it starts with a dot.
///
/// An empty or dot-only input yields an empty string, which no table entry
/// accepts.
pub fn normalize_extension(extension: &str) -> String {
    let trimmed = extension.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        return String::new();
    }
    format!(".{}", trimmed.to_lowercase())
}

/// Normalized extension of `path`, if it has one.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(normalize_extension)
        .filter(|e| !e.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_is_case_insensitive() {
        let table = FormatTable::builtin();
        assert_eq!(table.detect(".JPG"), table.detect(".jpg"));
        assert_eq!(table.detect(".JPG"), Some(Category::Image));
        assert_eq!(table.detect("Mp4"), Some(Category::Video));
    }

    #[test]
    fn every_input_detects_its_own_category() {
        let table = FormatTable::builtin();
        for spec in table.specs() {
            for ext in &spec.inputs {
                assert_eq!(table.detect(ext), Some(spec.category), "{ext}");
                assert_eq!(
                    table.detect(&ext.to_uppercase()),
                    Some(spec.category),
                    "{ext}"
                );
            }
        }
    }

    #[test]
    fn unknown_extension_has_no_category() {
        let table = FormatTable::builtin();
        assert_eq!(table.detect(".heic"), None);
        assert_eq!(table.detect(""), None);
    }

    #[test]
    fn detect_path_uses_extension() {
        let table = FormatTable::builtin();
        assert_eq!(
            table.detect_path(Path::new("/tmp/Song.FLAC")),
            Some(Category::Audio)
        );
        assert_eq!(table.detect_path(Path::new("/tmp/README")), None);
    }

    #[test]
    fn normalize_extension_forms() {
        assert_eq!(normalize_extension("PDF"), ".pdf");
        assert_eq!(normalize_extension(".Gif"), ".gif");
        assert_eq!(normalize_extension(" .mp3 "), ".mp3");
        assert_eq!(normalize_extension("."), "");
    }

    #[test]
    fn pdf_input_is_document() {
        // .pdf is an image *output* but only a document *input*
        let table = FormatTable::builtin();
        assert_eq!(table.detect(".pdf"), Some(Category::Document));
        assert!(table.spec(Category::Image).unwrap().accepts_output(".pdf"));
    }

    #[test]
    fn backends_per_category() {
        let table = FormatTable::builtin();
        assert_eq!(
            table.spec(Category::Image).unwrap().backend,
            BackendKind::ImageCodec
        );
        assert_eq!(
            table.spec(Category::Audio).unwrap().backend,
            BackendKind::Transcoder
        );
        assert_eq!(
            table.spec(Category::Document).unwrap().backend,
            BackendKind::Document
        );
    }
}
