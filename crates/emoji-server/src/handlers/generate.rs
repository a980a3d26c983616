use actix_web::{web, HttpRequest, HttpResponse};
use emoji_core::GeneratedMarkup;
use futures_util::StreamExt;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::middleware::extract_trace_id;
use crate::server::AppState;

/// Upper bound on a request body. Far above any valid request, so an
/// over-long description still reaches the validator.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct GenerateEmojiResponse {
    pub svg: GeneratedMarkup,
}

/// `POST /api/generate-emoji`
///
/// The body is read raw and parsed here so that a non-JSON payload falls into
/// the generic failure instead of actix's own extractor error.
pub async fn handler(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Payload,
) -> Result<HttpResponse> {
    let trace_id = extract_trace_id(&req).unwrap_or_default();
    log::info!("API route called trace_id={}", trace_id);

    let body = read_body(payload, MAX_BODY_BYTES).await?;
    let body: Value = serde_json::from_slice(&body).map_err(|e| {
        log::error!("Error generating emoji: request body is not JSON: {}", e);
        ApiError::MalformedBody(e)
    })?;

    let svg = state.pipeline.run(&body).await?;

    Ok(HttpResponse::Ok().json(GenerateEmojiResponse { svg }))
}

async fn read_body(mut payload: web::Payload, limit: usize) -> Result<web::BytesMut> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| {
            log::error!("Error generating emoji: failed to read request body: {}", e);
            ApiError::Payload(e)
        })?;
        if body.len() + chunk.len() > limit {
            log::warn!("Request body exceeds {} bytes", limit);
            return Err(ApiError::BodyTooLarge { limit });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}
