//! Self-hosted model behind a minimal `/generate` endpoint.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ProviderError;
use crate::traits::{GenerationProvider, TextStream};
use crate::types::GenerationRequest;

const DEFAULT_MAX_NEW_TOKENS: u32 = 128;
const DEFAULT_TEMPERATURE: f32 = 0.8;
const DEFAULT_TOP_K: u32 = 50;
const DEFAULT_TOP_P: f32 = 0.95;

#[derive(Debug, Serialize)]
struct LocalGenerateRequest {
    prompt: String,
    max_new_tokens: u32,
    temperature: f32,
    top_k: u32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct LocalGenerateResponse {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Clone)]
pub struct LocalModelProvider {
    http_client: HttpClient,
    base_url: String,
}

impl LocalModelProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Other(format!("failed to create HTTP client: {e}")))?;
        Ok(Self::with_http_client(base_url, http_client))
    }

    pub fn with_http_client(base_url: &str, http_client: HttpClient) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl GenerationProvider for LocalModelProvider {
    fn provider_name(&self) -> &'static str {
        "afritalk-local"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError> {
        // The local server only understands a flat prompt; inline media is dropped.
        let body = LocalGenerateRequest {
            prompt: request.prompt_text(),
            max_new_tokens: request
                .config
                .max_output_tokens
                .unwrap_or(DEFAULT_MAX_NEW_TOKENS),
            temperature: request.config.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            top_k: DEFAULT_TOP_K,
            top_p: DEFAULT_TOP_P,
        };

        let response = self
            .http_client
            .post(format!("{}/generate", self.base_url))
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status.as_u16(), &body));
        }
        let parsed: LocalGenerateResponse = response.json().await?;
        Ok(parsed.text)
    }

    async fn generate_stream(
        &self,
        _request: GenerationRequest,
    ) -> Result<TextStream, ProviderError> {
        Err(ProviderError::Unsupported(
            "streaming not supported for local provider".to_string(),
        ))
    }
}
