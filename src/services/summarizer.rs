use std::sync::Arc;

use crate::error::AppResult;
use crate::models::SummaryResponse;
use crate::services::llm::{ChatOutcome, ChatProvider};
use crate::services::ocr::OcrProvider;
use crate::services::{preprocess, prompt};

/// Turns one uploaded image into a diagram summary.
///
/// Holds no per-request state; the OCR and chat clients are shared and
/// injected at startup.
#[derive(Clone)]
pub struct DiagramSummarizer {
    ocr: Arc<dyn OcrProvider>,
    chat: Arc<dyn ChatProvider>,
}

impl DiagramSummarizer {
    pub fn new(ocr: Arc<dyn OcrProvider>, chat: Arc<dyn ChatProvider>) -> Self {
        Self { ocr, chat }
    }

    /// Decode, preprocess, OCR, then ask the model for a summary.
    ///
    /// An empty OCR result or a reply without `message.content` is reported
    /// through the returned payload, not as an error.
    pub async fn summarize(&self, image_bytes: Vec<u8>) -> AppResult<SummaryResponse> {
        log::info!("Preprocessing {} byte upload", image_bytes.len());
        let processed =
            tokio::task::spawn_blocking(move || preprocess::prepare_bytes(&image_bytes)).await??;

        let extracted_text = self.ocr.extract_text(&processed).await?;
        if extracted_text.is_empty() {
            log::warn!("{} returned no text, skipping summary", self.ocr.provider_id());
            return Ok(SummaryResponse::no_text());
        }

        let messages = prompt::build_summary_messages(&extracted_text);
        log::info!(
            "Requesting summary from {} for {} characters",
            self.chat.model(),
            extracted_text.len()
        );

        match self.chat.chat(&messages).await? {
            ChatOutcome::Reply(summary) => Ok(SummaryResponse::Summary {
                extracted_text,
                summary,
            }),
            ChatOutcome::Malformed(raw) => {
                log::warn!("Unexpected response from {}: {}", self.chat.model(), raw);
                Ok(SummaryResponse::unexpected_reply(raw))
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::error::AppError;
    use serde_json::json;
    use std::sync::atomic::Ordering;

    fn summarizer(ocr: &Arc<StubOcr>, chat: &Arc<StubChat>) -> DiagramSummarizer {
        DiagramSummarizer::new(ocr.clone(), chat.clone())
    }

    #[tokio::test]
    async fn test_success_payload() {
        let ocr = Arc::new(StubOcr::returning("Hello World"));
        let chat = Arc::new(StubChat::answering(
            json!({ "message": { "role": "assistant", "content": "graph TD;\n  A-->B;" } }),
        ));

        let response = summarizer(&ocr, &chat)
            .summarize(sample_png(30, 20))
            .await
            .unwrap();

        assert_eq!(
            response,
            SummaryResponse::Summary {
                extracted_text: "Hello World".to_string(),
                summary: "graph TD;\n  A-->B;".to_string(),
            }
        );
        assert_eq!(*ocr.last_dimensions.lock().unwrap(), Some((60, 40)));

        let messages = chat.last_messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "user");
        assert!(messages[0].content.ends_with("Here is the text to be summarized:\nHello World"));
    }

    #[tokio::test]
    async fn test_empty_text_never_reaches_the_model() {
        let ocr = Arc::new(StubOcr::returning(""));
        let chat = Arc::new(StubChat::answering(json!({ "message": { "content": "x" } })));

        let response = summarizer(&ocr, &chat)
            .summarize(sample_png(16, 16))
            .await
            .unwrap();

        assert_eq!(response, SummaryResponse::no_text());
        assert_eq!(chat.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_reply_embeds_raw_body() {
        let raw = json!({ "model": "m", "done": true, "message": { "role": "assistant" } });
        let ocr = Arc::new(StubOcr::returning("some text"));
        let chat = Arc::new(StubChat::answering(raw.clone()));

        let response = summarizer(&ocr, &chat)
            .summarize(sample_png(16, 16))
            .await
            .unwrap();

        assert_eq!(response, SummaryResponse::unexpected_reply(raw));
    }

    #[tokio::test]
    async fn test_undecodable_upload_skips_services() {
        let ocr = Arc::new(StubOcr::returning("text"));
        let chat = Arc::new(StubChat::answering(json!({})));

        let err = summarizer(&ocr, &chat)
            .summarize(b"GIF89a-but-not-really".to_vec())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Decode(_)));
        assert_eq!(ocr.calls.load(Ordering::SeqCst), 0);
        assert_eq!(chat.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unreachable_model_propagates() {
        let ocr = Arc::new(StubOcr::returning("text"));
        let chat = Arc::new(StubChat::unreachable());

        let err = summarizer(&ocr, &chat)
            .summarize(sample_png(16, 16))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Llm(_)));
    }

    #[tokio::test]
    async fn test_repeated_calls_are_identical() {
        let ocr = Arc::new(StubOcr::returning("Hello World"));
        let chat = Arc::new(StubChat::answering(json!({ "message": { "content": "graph TD;" } })));
        let service = summarizer(&ocr, &chat);
        let bytes = sample_png(24, 24);

        let first = service.summarize(bytes.clone()).await.unwrap();
        let second = service.summarize(bytes).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(chat.calls.load(Ordering::SeqCst), 2);
    }
}
