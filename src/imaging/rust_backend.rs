//! Pure Rust image processing backend — zero external dependencies.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Probe (dims + format) | `image::ImageReader::with_guessed_format` |
//! | Decode (BMP, GIF, JPEG, PNG, TIFF, WebP) | `image` crate (pure Rust decoders) |
//! | Resize | `image::DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Encode | `image` crate encoders, JPEG with explicit quality |
//!
//! The decode is memoized: an asset set derives every variant from one source
//! file, so the first resize decodes and subsequent resizes clone the cached
//! pixels instead of re-reading the file. Each resize operates on an
//! independent copy.

use super::backend::{BackendError, ImageBackend, SourceInfo};
use super::params::{EncodeFormat, Quality, ResizeParams};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
#[derive(Default)]
pub struct RustBackend {
    decoded: Mutex<Option<(PathBuf, DynamicImage)>>,
}

impl RustBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the source once, returning an independent copy per caller.
    ///
    /// The lock is held across the decode so concurrent resizes of the same
    /// source block on the first decode instead of each decoding again.
    fn decoded_copy(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        let mut cache = self.decoded.lock().unwrap();
        if let Some((cached_path, img)) = cache.as_ref()
            && cached_path == path
        {
            return Ok(img.clone());
        }
        let img = ImageReader::open(path)
            .map_err(BackendError::Io)?
            .with_guessed_format()
            .map_err(BackendError::Io)?
            .decode()
            .map_err(|e| BackendError::Decode {
                path: path.to_path_buf(),
                detail: e.to_string(),
            })?;
        *cache = Some((path.to_path_buf(), img.clone()));
        Ok(img)
    }
}

/// Map a detected `image` crate format into our output vocabulary.
fn encode_format_of(format: ImageFormat) -> Option<EncodeFormat> {
    match format {
        ImageFormat::Bmp => Some(EncodeFormat::Bmp),
        ImageFormat::Gif => Some(EncodeFormat::Gif),
        ImageFormat::Jpeg => Some(EncodeFormat::Jpeg),
        ImageFormat::Png => Some(EncodeFormat::Png),
        ImageFormat::Tiff => Some(EncodeFormat::Tiff),
        ImageFormat::WebP => Some(EncodeFormat::Webp),
        _ => None,
    }
}

fn image_format_of(format: EncodeFormat) -> ImageFormat {
    match format {
        EncodeFormat::Bmp => ImageFormat::Bmp,
        EncodeFormat::Gif => ImageFormat::Gif,
        EncodeFormat::Jpeg => ImageFormat::Jpeg,
        EncodeFormat::Png => ImageFormat::Png,
        EncodeFormat::Tiff => ImageFormat::Tiff,
        EncodeFormat::Webp => ImageFormat::WebP,
    }
}

/// Encode and save in the instruction's format.
///
/// JPEG goes through an explicit encoder for quality control and is flattened
/// to RGB first (the format has no alpha channel).
fn save_image(
    img: &DynamicImage,
    path: &Path,
    format: EncodeFormat,
    quality: Quality,
) -> Result<(), BackendError> {
    let file = std::fs::File::create(path).map_err(BackendError::Io)?;
    let mut writer = BufWriter::new(file);

    let result = match format {
        EncodeFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut writer, quality.value() as u8);
            img.to_rgb8().write_with_encoder(encoder)
        }
        other => img.write_to(&mut writer, image_format_of(other)),
    };

    result.map_err(|e| BackendError::Encode {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}

impl ImageBackend for RustBackend {
    fn probe(&self, path: &Path) -> Result<SourceInfo, BackendError> {
        let reader = ImageReader::open(path)
            .map_err(BackendError::Io)?
            .with_guessed_format()
            .map_err(BackendError::Io)?;
        let format = reader.format();
        let (width, height) = reader.into_dimensions().map_err(|e| BackendError::Decode {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        Ok(SourceInfo {
            width,
            height,
            format: format.and_then(encode_format_of),
        })
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        let img = self.decoded_copy(&params.source)?;
        let resized = img.resize_exact(params.width, params.height, FilterType::Lanczos3);
        save_image(&resized, &params.output, params.format, params.quality)
    }
}
