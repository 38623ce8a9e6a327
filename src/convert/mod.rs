//! Universal file conversion.
//!
//! Inputs are classified by extension into a [`Category`]; each category
//! has a fixed set of producible outputs and a backend. Images go through an
//! in-process [`ImageCodec`], video and audio through `ffmpeg`, documents
//! are declared but have no backend.

pub mod dispatcher;
pub mod error;
pub mod formats;
pub mod image;
pub mod transcode;

pub use dispatcher::{output_path, ConversionDispatcher, ConversionPlan, ConversionRequest};
pub use error::ConversionError;
pub use formats::{
    extension_of, normalize_extension, BackendKind, Category, FormatSpec, FormatTable,
};
pub use image::{ImageCodec, ImageCrateCodec, ImagePlan, ICO_MAX_DIMENSION};
pub use transcode::{TranscodeTemplate, Transcoder, ANIMATED_IMAGE_FILTER, FFMPEG_DOWNLOAD_URL};
