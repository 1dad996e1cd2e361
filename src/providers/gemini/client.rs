//! Gemini REST provider.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use reqwest::Client as HttpClient;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use super::streaming::into_text_stream;
use super::types::*;
use crate::config::{ClientConfig, DEFAULT_GEMINI_BASE_URL};
use crate::error::ProviderError;
use crate::traits::{GenerationProvider, TextStream};
use crate::types::{GenerationRequest, Part, SpeechAudio, SpeechRequest};

const API_KEY_HEADER: &str = "x-goog-api-key";
/// Gemini TTS returns raw 24 kHz 16-bit PCM.
pub const SPEECH_CONTENT_TYPE: &str = "audio/pcm";

/// Talks to the Generative Language API.
#[derive(Clone)]
pub struct GeminiProvider {
    http_client: HttpClient,
    api_key: SecretString,
    base_url: String,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiProvider {
    pub fn new(api_key: SecretString, timeout: Duration) -> Result<Self, ProviderError> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Other(format!("failed to create HTTP client: {e}")))?;
        Ok(Self::with_http_client(api_key, http_client))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ProviderError> {
        Ok(Self::new(config.api_key.clone(), config.timeout)?.with_base_url(&config.base_url))
    }

    pub fn with_http_client(api_key: SecretString, http_client: HttpClient) -> Self {
        Self {
            http_client,
            api_key,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/models/{model}:{method}", self.base_url)
    }

    async fn post(
        &self,
        url: String,
        body: &GenerateContentRequest,
    ) -> Result<reqwest::Response, ProviderError> {
        let response = self
            .http_client
            .post(url)
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(status_error(status.as_u16(), &body))
    }

    async fn generate_content(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let response = self.post(self.endpoint(model, "generateContent"), body).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Status error carrying the API's own message when the body is a Gemini error envelope.
fn status_error(status: u16, body: &str) -> ProviderError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let detail = match envelope.error.status {
                Some(code) => format!("{code}: {}", envelope.error.message),
                None => envelope.error.message,
            };
            ProviderError::from_status(status, &detail)
        }
        Err(_) => ProviderError::from_status(status, body),
    }
}

fn to_part(part: &Part) -> RequestPart {
    match part {
        Part::Text(text) => RequestPart::Text { text: text.clone() },
        Part::InlineData { mime_type, data } => RequestPart::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.clone(),
                data: STANDARD.encode(data),
            },
        },
    }
}

pub(crate) fn build_request(request: &GenerationRequest) -> GenerateContentRequest {
    let cfg = &request.config;
    let generation_config = GenerationConfig {
        temperature: cfg.temperature,
        max_output_tokens: cfg.max_output_tokens,
        thinking_config: cfg
            .thinking_budget
            .map(|thinking_budget| ThinkingConfig { thinking_budget }),
        response_mime_type: cfg.response_mime_type.clone(),
        response_schema: cfg.response_schema.clone(),
        ..Default::default()
    };

    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts: request.parts.iter().map(to_part).collect(),
        }],
        system_instruction: request.system_instruction.as_ref().map(|text| SystemInstruction {
            parts: vec![RequestPart::Text { text: text.clone() }],
        }),
        generation_config: (!generation_config.is_empty()).then_some(generation_config),
    }
}

fn build_speech_request(request: &SpeechRequest) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![RequestPart::Text {
                text: request.text.clone(),
            }],
        }],
        system_instruction: None,
        generation_config: Some(GenerationConfig {
            response_modalities: Some(vec!["AUDIO"]),
            speech_config: Some(SpeechConfig {
                voice_config: VoiceConfig {
                    prebuilt_voice_config: PrebuiltVoiceConfig {
                        voice_name: request.voice.clone(),
                    },
                },
            }),
            ..Default::default()
        }),
    }
}

#[async_trait]
impl GenerationProvider for GeminiProvider {
    fn provider_name(&self) -> &'static str {
        "google"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError> {
        let body = build_request(&request);
        let response = self.generate_content(&request.model, &body).await?;
        Ok(response.text())
    }

    async fn generate_stream(
        &self,
        request: GenerationRequest,
    ) -> Result<TextStream, ProviderError> {
        let body = build_request(&request);
        let url = format!(
            "{}?alt=sse",
            self.endpoint(&request.model, "streamGenerateContent")
        );
        let response = self.post(url, &body).await?;
        Ok(into_text_stream(response))
    }

    async fn synthesize_speech(
        &self,
        request: SpeechRequest,
    ) -> Result<SpeechAudio, ProviderError> {
        let body = build_speech_request(&request);
        let response = self.generate_content(&request.model, &body).await?;
        let Some(inline) = response.inline_data() else {
            return Ok(SpeechAudio {
                data: Bytes::new(),
                content_type: SPEECH_CONTENT_TYPE.to_string(),
            });
        };
        let data = STANDARD
            .decode(inline.data.as_bytes())
            .map_err(|e| ProviderError::InvalidResponse(format!("invalid audio payload: {e}")))?;
        Ok(SpeechAudio {
            data: Bytes::from(data),
            content_type: SPEECH_CONTENT_TYPE.to_string(),
        })
    }
}
