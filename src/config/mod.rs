use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub tesseract_cmd: PathBuf,
    pub ollama_host: String,
    pub ollama_model: String,
    pub ocr_timeout: Option<Duration>,
    pub llm_timeout: Option<Duration>,
    pub max_upload_bytes: usize,
}

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";
const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
const DEFAULT_OLLAMA_MODEL: &str = "supachai/llama-3-typhoon-v1.5";
const DEFAULT_OCR_TIMEOUT_SECS: u64 = 60;
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 300;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the configuration from an arbitrary key lookup. Missing or
    /// unparseable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(|o| o.trim().trim_end_matches('/').to_string())
            .filter(|o| !o.is_empty())
            .collect();

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(8000),
            cors_origins,
            tesseract_cmd: PathBuf::from(
                lookup("TESSERACT_CMD").unwrap_or_else(|| "tesseract".to_string()),
            ),
            ollama_host: lookup("OLLAMA_HOST").unwrap_or_else(|| DEFAULT_OLLAMA_HOST.to_string()),
            ollama_model: lookup("OLLAMA_MODEL")
                .unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string()),
            ocr_timeout: seconds(parsed("OCR_TIMEOUT_SECS").unwrap_or(DEFAULT_OCR_TIMEOUT_SECS)),
            llm_timeout: seconds(parsed("LLM_TIMEOUT_SECS").unwrap_or(DEFAULT_LLM_TIMEOUT_SECS)),
            max_upload_bytes: parsed("MAX_UPLOAD_BYTES")
                .map(|v| v as usize)
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        }
    }
}

// Zero disables the deadline.
fn seconds(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
