//! Generation provider capability trait

use crate::error::ProviderError;
use crate::types::{GenerationRequest, SpeechAudio, SpeechRequest};
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

/// Incremental text produced by a streaming generation call.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, ProviderError>> + Send>>;

/// Upstream model provider.
///
/// Implementations report raw transport failures as [`ProviderError`]; the
/// client classifies them into the application taxonomy.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Short identifier used in logs (e.g. `google`).
    fn provider_name(&self) -> &'static str;

    /// Single-shot generation. Returns the concatenated text of the answer,
    /// which may be empty.
    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError>;

    /// Streaming generation with the same content contract as [`generate`](Self::generate).
    async fn generate_stream(&self, request: GenerationRequest)
    -> Result<TextStream, ProviderError>;

    async fn synthesize_speech(
        &self,
        _request: SpeechRequest,
    ) -> Result<SpeechAudio, ProviderError> {
        Err(ProviderError::Unsupported(format!(
            "speech synthesis not supported by provider '{}'",
            self.provider_name()
        )))
    }
}
