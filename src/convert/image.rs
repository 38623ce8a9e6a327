//! Image codec backend.
//!
//! The dispatcher decides *what* has to happen to an image (an
//! [`ImagePlan`]); an [`ImageCodec`] does the decoding, transforming and
//! encoding. [`ImageCrateCodec`] is the production codec built on the
//! `image` crate. PDF output wraps a JPEG-encoded copy of the image in a
//! single page sized to the image, built with `lopdf`.

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Largest edge an `.ico` can hold.
pub const ICO_MAX_DIMENSION: u32 = 256;

/// Transformations required by the target format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImagePlan {
    /// Composite transparency onto white before saving.
    pub flatten_alpha: bool,
    /// Shrink so neither edge exceeds this, preserving aspect ratio.
    pub max_dimension: Option<u32>,
}

impl ImagePlan {
    /// The plan for writing into `target` (normalized extension).
    pub fn for_target(target: &str) -> Self {
        Self {
            flatten_alpha: matches!(target, ".jpg" | ".jpeg" | ".pdf"),
            max_dimension: (target == ".ico").then_some(ICO_MAX_DIMENSION),
        }
    }
}

/// Capability to load, transform and save images.
pub trait ImageCodec {
    /// Convert `input` into `output`, applying `plan`. The output format is
    /// chosen from the output path's extension.
    fn convert(&self, input: &Path, output: &Path, plan: &ImagePlan) -> Result<()>;
}

/// [`ImageCodec`] backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateCodec;

/// How the output file gets written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoder {
    Raster(ImageFormat),
    Pdf,
}

impl Encoder {
    fn for_output(output: &Path) -> Result<Self> {
        let is_pdf = output
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf {
            return Ok(Self::Pdf);
        }
        ImageFormat::from_path(output)
            .map(Self::Raster)
            .with_context(|| format!("no encoder for {}", output.display()))
    }
}

impl ImageCodec for ImageCrateCodec {
    fn convert(&self, input: &Path, output: &Path, plan: &ImagePlan) -> Result<()> {
        let encoder = Encoder::for_output(output)?;

        let mut img = image::open(input)
            .with_context(|| format!("failed to decode {}", input.display()))?;
        tracing::debug!(
            "Decoded {} ({}x{}, {:?})",
            input.display(),
            img.width(),
            img.height(),
            img.color()
        );

        if plan.flatten_alpha && img.color().has_alpha() {
            img = flatten_onto_white(&img);
        }

        if let Some(max) = plan.max_dimension {
            img = fit_within(img, max);
        }

        match encoder {
            Encoder::Raster(format) => img
                .save_with_format(output, format)
                .with_context(|| format!("failed to encode {}", output.display())),
            Encoder::Pdf => write_pdf(&img, output),
        }
    }
}

/// Write `img` as a one-page PDF. One pixel maps to one point.
fn write_pdf(img: &DynamicImage, output: &Path) -> Result<()> {
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut jpeg = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
        .with_context(|| format!("failed to encode page image for {}", output.display()))?;
    let width = i64::from(rgb.width());
    let height = i64::from(rgb.height());

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width,
            "Height" => height,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        jpeg,
    ));

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![width.into(), 0.into(), 0.into(), height.into(), 0.into(), 0.into()],
            ),
            Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_bytes = content.encode().context("failed to encode PDF page content")?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content_bytes));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! { "Im0" => image_id },
        },
        "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.save(output).with_context(|| format!("failed to write {}", output.display()))?;
    tracing::debug!("Wrote {}x{} page to {}", width, height, output.display());
    Ok(())
}

/// Alpha-composite an image onto an opaque white background.
pub fn flatten_onto_white(img: &DynamicImage) -> DynamicImage {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut out = RgbImage::new(width, height);

    for (x, y, px) in rgba.enumerate_pixels() {
        let [r, g, b, a] = px.0;
        let alpha = u32::from(a);
        let blend = |c: u8| ((u32::from(c) * alpha + 255 * (255 - alpha)) / 255) as u8;
        out.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }

    DynamicImage::ImageRgb8(out)
}

/// Downscale so neither edge exceeds `max`. Smaller images are left alone.
pub fn fit_within(img: DynamicImage, max: u32) -> DynamicImage {
    if img.width() <= max && img.height() <= max {
        return img;
    }
    img.resize(max, max, FilterType::Lanczos3)
}
