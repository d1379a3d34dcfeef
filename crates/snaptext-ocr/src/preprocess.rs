use std::io::Cursor;

use anyhow::{Context, Result};
use image::{GrayImage, ImageFormat, RgbaImage};
use imageproc::contrast::{ThresholdType, threshold};
use snaptext_types::RawImage;

pub use imageproc::contrast::otsu_level;

/// Grayscale then black/white at the Otsu level
pub fn binarize(image: &RawImage) -> Result<GrayImage> {
    let rgba = RgbaImage::from_raw(image.width, image.height, image.data.clone())
        .context("Image buffer does not match its size")?;

    let gray = image::imageops::grayscale(&rgba);
    let level = otsu_level(&gray);
    tracing::trace!("[PREPROCESS] Otsu level {}", level);

    Ok(threshold(&gray, level, ThresholdType::Binary))
}

/// Binarized image encoded as PNG, ready for the OCR engine
pub fn binarized_png(image: &RawImage) -> Result<Vec<u8>> {
    let gray = binarize(image)?;

    let mut buffer = Cursor::new(Vec::new());
    gray.write_to(&mut buffer, ImageFormat::Png)
        .context("Failed to encode PNG")?;
    Ok(buffer.into_inner())
}
