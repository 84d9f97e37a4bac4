use image::{GrayImage, ImageFormat};
use std::io::Cursor;

use crate::error::{AppError, AppResult};

pub fn encode_png(image: &GrayImage) -> AppResult<Vec<u8>> {
    let mut buffer = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|e| AppError::Internal(format!("Failed to encode image as PNG: {}", e)))?;
    Ok(buffer)
}
