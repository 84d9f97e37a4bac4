//! Image preparation ahead of OCR.
//!
//! The steps run in a fixed order: grayscale, binarize, upscale, denoise,
//! contrast. Reordering them changes what the OCR engine sees.

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Luma};
use imageproc::filter::median_filter;

use crate::constants::{BINARIZE_THRESHOLD, CONTRAST_FACTOR, MEDIAN_RADIUS, UPSCALE_FACTOR};
use crate::error::{AppError, AppResult};

/// Decode an uploaded payload into a raster image.
pub fn decode(bytes: &[u8]) -> AppResult<DynamicImage> {
    let image = image::load_from_memory(bytes)?;
    if image.width() == 0 || image.height() == 0 {
        return Err(AppError::Decode("image has no pixels".to_string()));
    }
    Ok(image)
}

/// Decode and run the full pipeline.
pub fn prepare_bytes(bytes: &[u8]) -> AppResult<GrayImage> {
    let image = decode(bytes)?;
    prepare_for_ocr(&image)
}

pub fn prepare_for_ocr(image: &DynamicImage) -> AppResult<GrayImage> {
    let gray = to_grayscale(image);
    let binary = binarize(&gray, BINARIZE_THRESHOLD);
    let upscaled = upscale(&binary, UPSCALE_FACTOR)?;
    let denoised = denoise(&upscaled);
    let enhanced = enhance_contrast(&denoised, CONTRAST_FACTOR);

    log::debug!(
        "Preprocessed {}x{} image into {}x{}",
        image.width(),
        image.height(),
        enhanced.width(),
        enhanced.height()
    );
    Ok(enhanced)
}

/// ITU-R 601-2 luma, L = R*299/1000 + G*587/1000 + B*114/1000, in 16-bit
/// fixed point with rounding. Alpha is ignored.
pub fn to_grayscale(image: &DynamicImage) -> GrayImage {
    let rgb = image.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let luma = u32::from(r) * 19595 + u32::from(g) * 38470 + u32::from(b) * 7471 + 0x8000;
        Luma([(luma >> 16) as u8])
    })
}

/// Pixels strictly below `threshold` become black, everything else white.
pub fn binarize(image: &GrayImage, threshold: u8) -> GrayImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        pixel.0[0] = if pixel.0[0] < threshold { 0 } else { 255 };
    }
    out
}

pub fn upscale(image: &GrayImage, factor: u32) -> AppResult<GrayImage> {
    let (width, height) = image.dimensions();
    let target = width
        .checked_mul(factor)
        .zip(height.checked_mul(factor))
        .ok_or_else(|| {
            AppError::Decode(format!("image too large to upscale: {}x{}", width, height))
        })?;

    Ok(imageops::resize(image, target.0, target.1, FilterType::Lanczos3))
}

pub fn denoise(image: &GrayImage) -> GrayImage {
    median_filter(image, MEDIAN_RADIUS, MEDIAN_RADIUS)
}

/// Scale every pixel's distance from the mean luminance by `factor`.
pub fn enhance_contrast(image: &GrayImage, factor: f32) -> GrayImage {
    let mean = mean_luminance(image);
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let value = mean + factor * (f32::from(pixel.0[0]) - mean);
        pixel.0[0] = (value as i32).clamp(0, 255) as u8;
    }
    out
}

// Rounded to the nearest integer level, matching a flat "degenerate" image.
fn mean_luminance(image: &GrayImage) -> f32 {
    let count = u64::from(image.width()) * u64::from(image.height());
    if count == 0 {
        return 0.0;
    }
    let sum: u64 = image.pixels().map(|p| u64::from(p.0[0])).sum();
    (sum as f64 / count as f64 + 0.5).floor() as f32
}
