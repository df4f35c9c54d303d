use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView};

use crate::config::ResampleFilter;
use crate::error::NormalizeError;
use crate::format::ImageFormat;
use crate::geometry::{plan_crop, Dimensions};

/// Resize `img` proportionally and center-crop it to exactly `target`.
pub fn fit_to_target(
    img: &DynamicImage,
    target: Dimensions,
    filter: ResampleFilter,
) -> Result<DynamicImage, NormalizeError> {
    let source = Dimensions::from(img.dimensions());
    let plan = plan_crop(source, target)?;

    if plan.is_identity(source) {
        log::debug!("{source} already matches target, leaving pixels untouched");
        return Ok(img.clone());
    }

    log::debug!(
        "{source} → scale {} → crop {}x{} at ({}, {})",
        plan.scaled,
        plan.width,
        plan.height,
        plan.left,
        plan.top
    );

    let scaled = if plan.scaled == source {
        img.clone()
    } else {
        img.resize_exact(plan.scaled.width, plan.scaled.height, filter.to_filter_type())
    };

    Ok(scaled.crop_imm(plan.left, plan.top, plan.width, plan.height))
}

/// Encode for the given output format. `quality` only affects JPEG.
pub fn encode(
    img: &DynamicImage,
    format: ImageFormat,
    quality: u8,
) -> Result<Vec<u8>, NormalizeError> {
    if !format.supports_quality() {
        log::debug!("{} is lossless here, quality {} not used", format.as_str(), quality);
    }

    let mut output = Vec::new();
    let mut cursor = Cursor::new(&mut output);

    match format {
        ImageFormat::Jpg => {
            // JPEG has no alpha channel
            let rgb = img.to_rgb8();
            let mut encoder = JpegEncoder::new_with_quality(&mut cursor, quality.min(100));
            encoder
                .encode(
                    rgb.as_raw(),
                    rgb.width(),
                    rgb.height(),
                    image::ExtendedColorType::Rgb8,
                )
                .map_err(|e| NormalizeError::Encode(format!("Failed to encode JPEG: {}", e)))?;
        }
        ImageFormat::Png => {
            img.write_to(&mut cursor, format.to_image_format())
                .map_err(|e| NormalizeError::Encode(format!("Failed to encode PNG: {}", e)))?;
        }
        ImageFormat::Gif | ImageFormat::Bmp => {
            // Both encoders only take 8-bit RGB(A)
            let eight_bit = if format == ImageFormat::Gif || img.color().has_alpha() {
                DynamicImage::ImageRgba8(img.to_rgba8())
            } else {
                DynamicImage::ImageRgb8(img.to_rgb8())
            };
            eight_bit
                .write_to(&mut cursor, format.to_image_format())
                .map_err(|e| {
                    NormalizeError::Encode(format!("Failed to encode {}: {}", format.as_str(), e))
                })?;
        }
    }

    Ok(output)
}
