use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::ChatMessage;

/// Result of a chat call, classified once at the client boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatOutcome {
    Reply(String),
    /// The service answered but without `message.content`; the raw body is
    /// kept for diagnosis.
    Malformed(Value),
}

impl ChatOutcome {
    pub fn from_raw(raw: Value) -> Self {
        match raw
            .get("message")
            .and_then(|m| m.get("content"))
            .and_then(Value::as_str)
        {
            Some(content) => ChatOutcome::Reply(content.to_string()),
            None => ChatOutcome::Malformed(raw),
        }
    }
}

#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn chat(&self, messages: &[ChatMessage]) -> AppResult<ChatOutcome>;
    fn model(&self) -> &str;
}

/// Ollama `/api/chat` client, non-streaming.
pub struct OllamaChatProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

impl OllamaChatProvider {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Option<Duration>,
    ) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(config.ollama_host.clone(), config.ollama_model.clone(), config.llm_timeout)
    }
}

#[async_trait]
impl ChatProvider for OllamaChatProvider {
    async fn chat(&self, messages: &[ChatMessage]) -> AppResult<ChatOutcome> {
        let request_body = OllamaChatRequest {
            model: &self.model,
            messages,
            stream: false,
        };

        log::debug!("Sending chat request to Ollama (model={})", self.model);
        let resp = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request_body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        let text = resp.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(AppError::Llm(format!("Ollama returned {}: {}", status, text)));
        }

        let raw: Value = serde_json::from_str(&text)
            .map_err(|e| AppError::Llm(format!("Failed to parse Ollama response: {}", e)))?;

        Ok(ChatOutcome::from_raw(raw))
    }

    fn model(&self) -> &str {
        &self.model
    }
}

fn transport_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout(format!("Ollama request timed out: {}", err))
    } else {
        AppError::Llm(format!("Failed to reach Ollama: {}", err))
    }
}
