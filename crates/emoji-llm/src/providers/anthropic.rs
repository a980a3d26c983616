//! Anthropic provider and request-building helpers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::HeaderMap, Client};

use crate::error::LLMError;
use crate::provider::{MessagesProvider, Result};
use crate::types::{MessagesRequest, MessagesResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Applied by the client itself; callers never configure it per request.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// Anthropic Messages API provider.
pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AnthropicProvider {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self::with_client(client, api_key))
    }

    pub fn with_client(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_headers(&self) -> Result<HeaderMap> {
        use reqwest::header::{HeaderValue, CONTENT_TYPE};

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&self.api_key)
                .map_err(|e| LLMError::Auth(format!("Invalid API key: {}", e)))?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static(ANTHROPIC_VERSION));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(headers)
    }
}

#[async_trait]
impl MessagesProvider for AnthropicProvider {
    async fn create_message(&self, request: &MessagesRequest) -> Result<MessagesResponse> {
        let headers = self.build_headers()?;

        log::debug!(
            "POST {}/messages model={} max_tokens={} messages={}",
            self.base_url,
            request.model,
            request.max_tokens,
            request.messages.len()
        );

        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .headers(headers)
            .json(request)
            .send()
            .await
            .map_err(LLMError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.map_err(LLMError::Http)?;

            if status == 401 || status == 403 {
                return Err(LLMError::Auth(format!(
                    "Anthropic authentication failed: {}. Please check your API key.",
                    text
                )));
            }

            return Err(LLMError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let bytes = response.bytes().await.map_err(LLMError::Http)?;
        let message: MessagesResponse = serde_json::from_slice(&bytes)?;

        if let Some(usage) = &message.usage {
            log::debug!(
                "Anthropic usage: input_tokens={} output_tokens={}",
                usage.input_tokens,
                usage.output_tokens
            );
        }

        Ok(message)
    }
}
