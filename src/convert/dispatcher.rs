//! Conversion dispatch.
//!
//! A conversion runs through four checks before anything is written:
//! the input exists, its extension belongs to a category, the category can
//! produce the requested extension, and the category has a backend. Only then
//! is the image codec or the transcoder invoked.

use std::path::{Path, PathBuf};

use super::error::ConversionError;
use super::formats::{extension_of, normalize_extension, BackendKind, Category, FormatTable};
use super::image::{ImageCodec, ImagePlan};
use super::transcode::{TranscodeTemplate, Transcoder};

/// A validated conversion, ready to hand to a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionPlan {
    /// Source file.
    pub input: PathBuf,
    /// Category detected from the input extension.
    pub category: Category,
    /// Normalized target extension.
    pub target: String,
    /// Input path with its extension replaced by `target`.
    pub output: PathBuf,
    /// Engine that will run the conversion.
    pub backend: BackendKind,
}

/// Input path plus target extension, as requested by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub input: PathBuf,
    pub target: String,
}

impl ConversionRequest {
    /// Create a request. `target` may be given with or without its dot and in
    /// any case.
    pub fn new(input: impl Into<PathBuf>, target: &str) -> Self {
        Self {
            input: input.into(),
            target: normalize_extension(target),
        }
    }

    /// Run the existence and format-table checks.
    pub fn validate(&self, table: &FormatTable) -> Result<ConversionPlan, ConversionError> {
        if !self.input.is_file() {
            return Err(ConversionError::NotFound {
                path: self.input.clone(),
            });
        }

        let spec = table
            .detect_path(&self.input)
            .and_then(|category| table.spec(category))
            .ok_or_else(|| ConversionError::UnsupportedInput {
                extension: extension_of(&self.input).unwrap_or_default(),
            })?;

        if !spec.accepts_output(&self.target) {
            return Err(ConversionError::UnsupportedConversion {
                category: spec.category,
                extension: self.target.clone(),
            });
        }

        Ok(ConversionPlan {
            input: self.input.clone(),
            category: spec.category,
            target: self.target.clone(),
            output: output_path(&self.input, &self.target),
            backend: spec.backend,
        })
    }
}

/// Same directory and stem as `input`, with `target` as the extension.
pub fn output_path(input: &Path, target: &str) -> PathBuf {
    input.with_extension(target.trim_start_matches('.'))
}

/// Routes conversions to the image codec or the transcoder.
pub struct ConversionDispatcher<'a> {
    table: FormatTable,
    images: &'a dyn ImageCodec,
    transcoder: Transcoder<'a>,
}

impl<'a> ConversionDispatcher<'a> {
    /// Create a dispatcher over the built-in format table.
    pub fn new(images: &'a dyn ImageCodec, transcoder: Transcoder<'a>) -> Self {
        Self {
            table: FormatTable::builtin(),
            images,
            transcoder,
        }
    }

    /// The format table in use.
    pub fn table(&self) -> &FormatTable {
        &self.table
    }

    /// Validate without converting.
    pub fn plan(&self, input: &Path, target: &str) -> Result<ConversionPlan, ConversionError> {
        ConversionRequest::new(input, target).validate(&self.table)
    }

    /// Convert `input` to `target`, returning the written path.
    pub fn convert(&self, input: &Path, target: &str) -> Result<PathBuf, ConversionError> {
        let plan = self.plan(input, target)?;
        self.execute(&plan)?;
        Ok(plan.output)
    }

    /// Run a validated plan on its backend.
    pub fn execute(&self, plan: &ConversionPlan) -> Result<(), ConversionError> {
        tracing::debug!(
            "Converting {} ({}) -> {} via {}",
            plan.input.display(),
            plan.category,
            plan.output.display(),
            plan.backend
        );

        match plan.backend {
            BackendKind::ImageCodec => {
                let image_plan = ImagePlan::for_target(&plan.target);
                self.images
                    .convert(&plan.input, &plan.output, &image_plan)
                    .map_err(|e| ConversionError::BackendFailure {
                        backend: BackendKind::ImageCodec.to_string(),
                        diagnostic: format!("{:#}", e),
                    })
            }
            BackendKind::Transcoder => {
                let template = TranscodeTemplate::select(plan.category, &plan.target);
                self.transcoder
                    .transcode(template, &plan.input, &plan.output)
            }
            BackendKind::Document => Err(ConversionError::NotImplemented {
                category: plan.category,
            }),
        }
    }
}
