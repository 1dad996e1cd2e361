//! Chat operations.

use tracing::Instrument;
use uuid::Uuid;

use crate::client::AfriTalk;
use crate::error::AfriError;
use crate::streaming::{ChunkReceiver, StreamTranscoder};
use crate::types::{ChatRequest, ChatResponse};
use crate::utils::CancelHandle;

impl AfriTalk {
    /// Single-shot chat.
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, AfriError> {
        self.chat_as(None, request).await
    }

    /// Single-shot chat on behalf of `caller`, counted by the rate limiter.
    pub async fn chat_as(
        &self,
        caller: Option<&str>,
        request: ChatRequest,
    ) -> Result<ChatResponse, AfriError> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("chat", %request_id);
        async move {
            self.admit(caller)?;
            let cancel = CancelHandle::new();
            let context = self.preparer(&cancel).prepare(request).await?;
            let metadata = context.metadata();
            let generation = context.into_generation();

            let text = self
                .retry
                .execute(|| self.provider.generate(generation.clone()))
                .await
                .map_err(AfriError::from)?;
            if text.trim().is_empty() {
                tracing::warn!(model = %metadata.model, "provider returned no text");
                return Err(AfriError::EmptyResponse("Empty AI response.".to_string()));
            }

            tracing::info!(
                language = %metadata.language,
                model = %metadata.model,
                detected = metadata.detected,
                response_len = text.len(),
                "chat completed"
            );
            Ok(ChatResponse { text, metadata })
        }
        .instrument(span)
        .await
    }

    /// Streamed chat. Preparation failures are returned directly; failures
    /// after the metadata chunk arrive as an `error` chunk.
    pub async fn chat_stream(&self, request: ChatRequest) -> Result<ChunkReceiver, AfriError> {
        self.chat_stream_with_cancel(None, request, CancelHandle::new())
            .await
    }

    pub async fn chat_stream_as(
        &self,
        caller: Option<&str>,
        request: ChatRequest,
    ) -> Result<ChunkReceiver, AfriError> {
        self.chat_stream_with_cancel(caller, request, CancelHandle::new())
            .await
    }

    /// Streamed chat stopped by `cancel`, whether it fires during
    /// preparation, a retry backoff or mid-stream.
    pub async fn chat_stream_with_cancel(
        &self,
        caller: Option<&str>,
        request: ChatRequest,
        cancel: CancelHandle,
    ) -> Result<ChunkReceiver, AfriError> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("chat_stream", %request_id);
        async move {
            self.admit(caller)?;
            let context = self.preparer(&cancel).prepare(request).await?;
            let metadata = context.metadata();
            let generation = context.into_generation();
            tracing::info!(
                language = %metadata.language,
                model = %metadata.model,
                "starting chat stream"
            );

            let provider = self.provider.clone();
            let retry = self.retry.clone();
            let open_cancel = cancel.clone();
            let open = async move {
                retry
                    .execute_cancellable(&open_cancel, || {
                        provider.generate_stream(generation.clone())
                    })
                    .await
                    .map_err(AfriError::from)
            }
            .in_current_span();

            Ok(StreamTranscoder::new(self.stream_buffer, cancel).spawn(metadata, open))
        }
        .instrument(span)
        .await
    }
}
