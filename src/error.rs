use actix_web::{HttpResponse, ResponseError};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    PayloadTooLarge(usize),
    Decode(String),
    Ocr(String),
    Llm(String),
    Timeout(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::PayloadTooLarge(limit) => {
                write!(f, "Upload exceeds the {} byte limit", limit)
            }
            AppError::Decode(msg) => write!(f, "Unable to decode image: {}", msg),
            AppError::Ocr(msg) => write!(f, "OCR service error: {}", msg),
            AppError::Llm(msg) => write!(f, "LLM service error: {}", msg),
            AppError::Timeout(msg) => write!(f, "Timed out: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = serde_json::json!({ "error": self.to_string() });
        match self {
            AppError::BadRequest(_) | AppError::Decode(_) => HttpResponse::BadRequest().json(body),
            AppError::PayloadTooLarge(_) => HttpResponse::PayloadTooLarge().json(body),
            AppError::Ocr(_) | AppError::Llm(_) => HttpResponse::BadGateway().json(body),
            AppError::Timeout(_) => HttpResponse::GatewayTimeout().json(body),
            AppError::Internal(_) => HttpResponse::InternalServerError().json(body),
        }
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::Decode(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("Background task failed: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::Decode("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::BadRequest("no file".into()), StatusCode::BAD_REQUEST),
            (AppError::PayloadTooLarge(10), StatusCode::PAYLOAD_TOO_LARGE),
            (AppError::Ocr("missing".into()), StatusCode::BAD_GATEWAY),
            (AppError::Llm("down".into()), StatusCode::BAD_GATEWAY),
            (AppError::Timeout("ocr".into()), StatusCode::GATEWAY_TIMEOUT),
            (AppError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.error_response().status(), status, "{}", err);
        }
    }
}
