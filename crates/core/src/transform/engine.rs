//! `image`-crate backed transformer implementation.

use async_trait::async_trait;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::conversion::{ImageFormat as TargetFormat, Manipulation};

use super::error::TransformError;
use super::traits::ImageTransformer;

/// Default JPEG quality when a `Quality` step re-encodes without an explicit
/// value having applied yet.
const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Bottom-right watermark inset in pixels.
const WATERMARK_MARGIN: i64 = 8;

/// In-process manipulation engine backed by the `image` crate.
///
/// Each `apply` call decodes the file (format guessed from content, since the
/// working copy's extension may lag behind a `Format` step), performs one
/// operation and re-encodes to the same path.
#[derive(Debug, Clone, Default)]
pub struct ImageEngine;

impl ImageEngine {
    /// Creates a new engine.
    pub fn new() -> Self {
        Self
    }

    fn decode(path: &Path) -> Result<(DynamicImage, ImageFormat), TransformError> {
        let reader = ImageReader::open(path)?
            .with_guessed_format()
            .map_err(|e| TransformError::decode_failed(path.to_path_buf(), e.to_string()))?;
        let format = reader.format().ok_or_else(|| {
            TransformError::decode_failed(path.to_path_buf(), "unrecognized image format")
        })?;
        let img = reader
            .decode()
            .map_err(|e| TransformError::decode_failed(path.to_path_buf(), e.to_string()))?;
        Ok((img, format))
    }

    fn encode(
        img: &DynamicImage,
        format: ImageFormat,
        quality: Option<u8>,
        path: &Path,
    ) -> Result<Vec<u8>, TransformError> {
        let mut buf = Vec::new();
        match format {
            ImageFormat::Jpeg => {
                // JPEG has no alpha channel.
                let rgb = img.to_rgb8();
                let encoder = JpegEncoder::new_with_quality(
                    &mut buf,
                    quality.unwrap_or(DEFAULT_JPEG_QUALITY),
                );
                rgb.write_with_encoder(encoder)
                    .map_err(|e| TransformError::encode_failed(path.to_path_buf(), e.to_string()))?;
            }
            other => {
                img.write_to(&mut Cursor::new(&mut buf), other)
                    .map_err(|e| TransformError::encode_failed(path.to_path_buf(), e.to_string()))?;
            }
        }
        Ok(buf)
    }

    fn target_format(format: &TargetFormat) -> ImageFormat {
        match format {
            TargetFormat::Jpeg => ImageFormat::Jpeg,
            TargetFormat::Png => ImageFormat::Png,
            TargetFormat::Webp => ImageFormat::WebP,
            TargetFormat::Gif => ImageFormat::Gif,
        }
    }

    /// Applies one manipulation synchronously. Runs on a blocking thread.
    fn apply_blocking(manipulation: &Manipulation, path: &Path) -> Result<(), TransformError> {
        let (img, source_format) = Self::decode(path)?;
        let (width, height) = (img.width(), img.height());

        let mut encode_format = source_format;
        let mut quality = None;

        let transformed = match manipulation {
            Manipulation::Resize {
                width: w,
                height: h,
            } => img.resize(*w, *h, FilterType::Lanczos3),
            Manipulation::Crop {
                x,
                y,
                width: w,
                height: h,
            } => {
                if x + w > width || y + h > height {
                    return Err(TransformError::InvalidManipulation {
                        reason: format!(
                            "crop {}x{}+{}+{} exceeds image bounds {}x{}",
                            w, h, x, y, width, height
                        ),
                    });
                }
                img.crop_imm(*x, *y, *w, *h)
            }
            Manipulation::CropFocal {
                width: w,
                height: h,
                focal_x_pct,
                focal_y_pct,
            } => {
                let w = (*w).min(width);
                let h = (*h).min(height);
                let focal_x = (width as f32 * focal_x_pct / 100.0) as i64;
                let focal_y = (height as f32 * focal_y_pct / 100.0) as i64;
                let x = (focal_x - w as i64 / 2).clamp(0, (width - w) as i64) as u32;
                let y = (focal_y - h as i64 / 2).clamp(0, (height - h) as i64) as u32;
                img.crop_imm(x, y, w, h)
            }
            Manipulation::Format(target) => {
                encode_format = Self::target_format(target);
                img
            }
            Manipulation::Quality(q) => {
                quality = Some((*q).clamp(1, 100));
                img
            }
            Manipulation::Greyscale => img.grayscale(),
            Manipulation::Blur(sigma) => img.blur(*sigma),
            Manipulation::Watermark { path: mark_path } => {
                let mark = image::open(mark_path)
                    .map_err(|_| TransformError::WatermarkUnusable {
                        path: mark_path.clone(),
                    })?
                    .into_rgba8();
                let mut base = img.into_rgba8();
                let x = (base.width() as i64 - mark.width() as i64 - WATERMARK_MARGIN).max(0);
                let y = (base.height() as i64 - mark.height() as i64 - WATERMARK_MARGIN).max(0);
                image::imageops::overlay(&mut base, &mark, x, y);
                DynamicImage::ImageRgba8(base)
            }
        };

        let bytes = Self::encode(&transformed, encode_format, quality, path)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

#[async_trait]
impl ImageTransformer for ImageEngine {
    fn name(&self) -> &str {
        "image"
    }

    async fn apply(&self, manipulation: &Manipulation, path: &Path) -> Result<(), TransformError> {
        debug!(path = %path.display(), ?manipulation, "applying manipulation");
        let manipulation = manipulation.clone();
        let path: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::apply_blocking(&manipulation, &path))
            .await
            .map_err(|e| TransformError::InvalidManipulation {
                reason: format!("manipulation task panicked: {}", e),
            })?
    }
}
