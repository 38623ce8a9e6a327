//! Conversion failures.

use std::path::PathBuf;

use thiserror::Error;

use super::formats::Category;

/// Why a conversion did not produce an output file.
///
/// Each variant corresponds to one step of the dispatch pipeline. None of
/// them is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// The input path is not a regular file.
    #[error("Input file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// No category accepts the input extension.
    #[error("Unsupported input format: {extension}")]
    UnsupportedInput { extension: String },

    /// The category cannot produce the requested output extension.
    #[error("Cannot convert {category} to {extension}")]
    UnsupportedConversion { category: Category, extension: String },

    /// The category is declared but has no backend.
    #[error("{category} conversion is not implemented")]
    NotImplemented { category: Category },

    /// The backend ran and failed.
    #[error("{backend} failed: {diagnostic}")]
    BackendFailure { backend: String, diagnostic: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_displays_path() {
        let err = ConversionError::NotFound {
            path: PathBuf::from("/videos/clip.mp4"),
        };
        assert!(err.to_string().contains("/videos/clip.mp4"));
    }

    #[test]
    fn unsupported_conversion_names_both_sides() {
        let err = ConversionError::UnsupportedConversion {
            category: Category::Image,
            extension: ".mp3".into(),
        };
        assert_eq!(err.to_string(), "Cannot convert image to .mp3");
    }

    #[test]
    fn backend_failure_carries_diagnostic() {
        let err = ConversionError::BackendFailure {
            backend: "ffmpeg".into(),
            diagnostic: "Invalid data found when processing input".into(),
        };
        assert!(err.to_string().contains("Invalid data found"));
    }
}
