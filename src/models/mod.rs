use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{NO_TEXT_ERROR, UNEXPECTED_REPLY_ERROR};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Body of a `/summarize-ocr/` reply. All three shapes are sent with 200.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SummaryResponse {
    Summary {
        extracted_text: String,
        summary: String,
    },
    NoText {
        error: String,
    },
    UnexpectedReply {
        error: String,
        response: Value,
    },
}

impl SummaryResponse {
    pub fn no_text() -> Self {
        SummaryResponse::NoText {
            error: NO_TEXT_ERROR.to_string(),
        }
    }

    pub fn unexpected_reply(response: Value) -> Self {
        SummaryResponse::UnexpectedReply {
            error: UNEXPECTED_REPLY_ERROR.to_string(),
            response,
        }
    }
}
