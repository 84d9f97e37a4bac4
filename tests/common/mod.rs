#![allow(dead_code)]

use async_trait::async_trait;
use diagram_summary::{AppError, AppResult, ChatMessage, ChatOutcome, ChatProvider, OcrProvider};
use image::{DynamicImage, GrayImage, ImageFormat, Rgb, RgbImage};
use serde_json::Value;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const BOUNDARY: &str = "----diagram-summary-boundary";

pub struct FixedOcr {
    pub text: String,
    pub calls: AtomicUsize,
}

impl FixedOcr {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OcrProvider for FixedOcr {
    async fn extract_text(&self, _image: &GrayImage) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.text.clone())
    }

    fn provider_id(&self) -> &'static str {
        "fixed"
    }
}

pub struct CannedChat {
    pub raw: Option<Value>,
    pub calls: AtomicUsize,
}

impl CannedChat {
    pub fn new(raw: Value) -> Self {
        Self {
            raw: Some(raw),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn down() -> Self {
        Self {
            raw: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatProvider for CannedChat {
    async fn chat(&self, _messages: &[ChatMessage]) -> AppResult<ChatOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.raw {
            Some(raw) => Ok(ChatOutcome::from_raw(raw.clone())),
            None => Err(AppError::Llm("connection refused".to_string())),
        }
    }

    fn model(&self) -> &str {
        "canned"
    }
}

/// "Hello World"-style document: black strokes on a white page.
pub fn hello_world_png() -> Vec<u8> {
    let image = RgbImage::from_fn(64, 24, |x, y| {
        let stroke = (8..12).contains(&y) && (4..60).contains(&x) && x % 6 != 0;
        if stroke {
            Rgb([10, 10, 10])
        } else {
            Rgb([255, 255, 255])
        }
    });
    let mut buffer = Vec::new();
    DynamicImage::ImageRgb8(image)
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    buffer
}

pub fn multipart_body(field: &str, filename: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}
