use actix_web::{error::PayloadError, http::StatusCode, HttpResponse, ResponseError};
use emoji_core::PipelineError;
use serde_json::json;
use thiserror::Error;

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

const INVALID_BODY: &str = "Invalid request body";
const READ_FAILED: &str = "Failed to read SVG file";
const GENERATION_FAILED: &str = "Failed to generate emoji";

/// Failures at the HTTP boundary. This is the only place pipeline errors are
/// turned into status codes and wire bodies.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request body is not JSON: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("failed to read request body: {0}")]
    Payload(#[from] PayloadError),

    #[error("asset path '{0}' does not name an asset")]
    InvalidAssetPath(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedBody(_) | ApiError::Payload(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BodyTooLarge { .. } => StatusCode::BAD_REQUEST,
            ApiError::InvalidAssetPath(_) => StatusCode::NOT_FOUND,
            ApiError::Pipeline(PipelineError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Pipeline(PipelineError::AssetNotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Pipeline(PipelineError::UpstreamShape(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Pipeline(PipelineError::UpstreamCall(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Pipeline(PipelineError::Validation(errors)) => json!({
                "error": INVALID_BODY,
                "details": errors,
            }),
            ApiError::Pipeline(PipelineError::AssetNotFound { svg_key }) => json!({
                "error": READ_FAILED,
                "details": format!("SVG key: {svg_key}"),
            }),
            ApiError::Pipeline(PipelineError::UpstreamShape(shape)) => json!({
                "error": shape.to_string(),
            }),
            ApiError::BodyTooLarge { limit } => json!({
                "error": INVALID_BODY,
                "details": { "_errors": [format!("Request body must be at most {limit} byte(s)")] },
            }),
            ApiError::InvalidAssetPath(_) => json!({ "error": "Not found" }),
            ApiError::MalformedBody(_)
            | ApiError::Payload(_)
            | ApiError::Pipeline(PipelineError::UpstreamCall(_)) => {
                json!({ "error": GENERATION_FAILED })
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use emoji_core::UpstreamShapeError;
    use emoji_core::validation::validate_request;
    use emoji_llm::LLMError;
    use serde_json::Value;

    async fn body_of(error: ApiError) -> (StatusCode, Value) {
        let response = error.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn validation_maps_to_400_with_details() {
        let errors = validate_request(&json!({"description": "x"})).unwrap_err();

        let (status, body) = body_of(ApiError::Pipeline(errors.into())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], INVALID_BODY);
        assert_eq!(body["details"]["svgKey"]["_errors"][0], "Required");
    }

    #[actix_web::test]
    async fn empty_content_maps_to_500_with_description() {
        let (status, body) =
            body_of(ApiError::Pipeline(UpstreamShapeError::EmptyContent.into())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "No content in Claude API response"}));
    }

    #[actix_web::test]
    async fn unexpected_block_maps_to_500_with_description() {
        let shape = UpstreamShapeError::UnexpectedBlock { kind: "tool_use" };

        let (status, body) = body_of(ApiError::Pipeline(shape.into())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Unexpected response format from Claude API"}));
    }

    #[actix_web::test]
    async fn upstream_call_failure_is_generic() {
        let failure = LLMError::Api {
            status: 503,
            body: "unavailable".to_string(),
        };

        let (status, body) = body_of(ApiError::Pipeline(failure.into())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": GENERATION_FAILED}));
    }

    #[actix_web::test]
    async fn malformed_body_is_generic() {
        let parse_error = serde_json::from_str::<Value>("{not json").unwrap_err();

        let (status, body) = body_of(ApiError::MalformedBody(parse_error)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": GENERATION_FAILED}));
    }

    #[actix_web::test]
    async fn oversized_body_maps_to_400_form_error() {
        let (status, body) = body_of(ApiError::BodyTooLarge { limit: 1024 }).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], INVALID_BODY);
        assert_eq!(
            body["details"]["_errors"][0],
            "Request body must be at most 1024 byte(s)"
        );
    }

    #[actix_web::test]
    async fn interrupted_body_is_generic() {
        let (status, body) = body_of(ApiError::Payload(PayloadError::Incomplete(None))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": GENERATION_FAILED}));
    }
}
