use async_trait::async_trait;
use image::GrayImage;
use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::Config;
use crate::constants::OCR_LANGUAGE;
use crate::error::{AppError, AppResult};

#[async_trait]
pub trait OcrProvider: Send + Sync {
    /// Recognize the text in an already preprocessed image.
    async fn extract_text(&self, image: &GrayImage) -> AppResult<String>;
    fn provider_id(&self) -> &'static str;
}

/// Runs the `tesseract` executable, feeding a PNG on stdin and reading
/// plain text from stdout.
pub struct TesseractOcrProvider {
    command: PathBuf,
    language: String,
    timeout: Option<Duration>,
}

impl TesseractOcrProvider {
    pub fn new(command: impl Into<PathBuf>, timeout: Option<Duration>) -> Self {
        Self {
            command: command.into(),
            language: OCR_LANGUAGE.to_string(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.tesseract_cmd.clone(), config.ocr_timeout)
    }

    async fn run(&self, png: Vec<u8>) -> AppResult<String> {
        let mut child = Command::new(&self.command)
            .arg("stdin")
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                AppError::Ocr(format!("Failed to execute {}: {}", self.command.display(), e))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| AppError::Ocr("tesseract stdin unavailable".to_string()))?;
        // A failed write usually means tesseract already exited; its stderr
        // says why, so collect the output before reporting.
        let sent = stdin.write_all(&png).await;
        drop(stdin);

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| AppError::Ocr(format!("Failed to read tesseract output: {}", e)))?;
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            return Err(AppError::Ocr(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        if let Err(e) = sent {
            return Err(AppError::Ocr(format!(
                "Failed to send image to tesseract: {}: {}",
                e,
                stderr.trim()
            )));
        }

        // Tesseract terminates every page with a newline and a form feed.
        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }
}

#[async_trait]
impl OcrProvider for TesseractOcrProvider {
    async fn extract_text(&self, image: &GrayImage) -> AppResult<String> {
        log::debug!(
            "Running tesseract on {}x{} image (lang={})",
            image.width(),
            image.height(),
            self.language
        );
        let png = crate::utils::encode_png(image)?;
        let text = with_deadline(self.timeout, "OCR", self.run(png)).await?;
        log::info!("Tesseract extracted {} characters", text.len());
        Ok(text)
    }

    fn provider_id(&self) -> &'static str {
        "tesseract"
    }
}

async fn with_deadline<T, F>(timeout: Option<Duration>, what: &str, fut: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, fut).await.map_err(|_| {
            AppError::Timeout(format!("{} did not finish within {:?}", what, limit))
        })?,
        None => fut.await,
    }
}
