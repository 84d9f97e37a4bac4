use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures::TryStreamExt;
use log::error;

use crate::config::Config;
use crate::constants::UPLOAD_FIELD;
use crate::error::{AppError, AppResult};
use crate::services::DiagramSummarizer;

/// `POST /summarize-ocr/` with a multipart `file` field.
pub async fn summarize_ocr(
    payload: Multipart,
    summarizer: web::Data<DiagramSummarizer>,
    config: web::Data<Config>,
) -> AppResult<HttpResponse> {
    let image_bytes = read_upload(payload, config.max_upload_bytes).await?;

    match summarizer.summarize(image_bytes).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => {
            error!("Summarize request failed: {}", e);
            Err(e)
        }
    }
}

async fn read_upload(mut payload: Multipart, limit: usize) -> AppResult<Vec<u8>> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            while field
                .try_next()
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
                .is_some()
            {}
            continue;
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?
        {
            if bytes.len() + chunk.len() > limit {
                return Err(AppError::PayloadTooLarge(limit));
            }
            bytes.extend_from_slice(&chunk);
        }
        return Ok(bytes);
    }

    Err(AppError::BadRequest(format!(
        "missing multipart field '{}'",
        UPLOAD_FIELD
    )))
}
