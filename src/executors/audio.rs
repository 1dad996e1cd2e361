//! Voice operations: transcription, streamed transcription and speech.

use async_stream::try_stream;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::pin::Pin;

use crate::client::AfriTalk;
use crate::error::AfriError;
use crate::retry::RetryExecutor;
use crate::traits::GenerationProvider;
use crate::types::{
    GenerationRequest, SpeakRequest, SpeakResponse, SpeechRequest, VoiceRequest, VoiceResponse,
    VoiceStreamChunk,
};
use crate::utils::CancelHandle;
use crate::utils::mime::resolve_audio_mime;

const TRANSCRIBE_PROMPT: &str = "Transcribe this audio accurately. Output ONLY the transcription.";
const STREAM_TRANSCRIBE_PROMPT: &str = "Transcribe this audio.";

/// Voice used when the caller names none or an unknown one.
pub const DEFAULT_VOICE: &str = "Kore";

/// Stream of transcription chunks.
pub type VoiceStream = Pin<Box<dyn Stream<Item = Result<VoiceStreamChunk, AfriError>> + Send>>;

/// Map an OpenAI-style voice name onto a provider voice.
pub fn provider_voice(voice: Option<&str>) -> &'static str {
    match voice.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("echo") => "Fenrir",
        Some("fable") => "Puck",
        Some("onyx") => "Charon",
        Some("nova") => "Zephyr",
        // alloy, shimmer and anything unrecognized
        _ => DEFAULT_VOICE,
    }
}

fn transcription_request(
    model: &str,
    prompt: &str,
    audio: Bytes,
    mime_type: Option<&str>,
) -> GenerationRequest {
    let mime = resolve_audio_mime(mime_type, &audio);
    GenerationRequest::new(model)
        .with_inline_data(mime, audio)
        .with_text(prompt)
}

/// Transcribe audio with the audio model. Retried like any provider call.
pub(crate) async fn transcribe(
    provider: &dyn GenerationProvider,
    retry: &RetryExecutor,
    model: &str,
    audio: Bytes,
    mime_type: Option<&str>,
    cancel: &CancelHandle,
) -> Result<String, AfriError> {
    let request = transcription_request(model, TRANSCRIBE_PROMPT, audio, mime_type);
    let text = retry
        .execute_cancellable(cancel, || provider.generate(request.clone()))
        .await
        .map_err(AfriError::from)?;
    tracing::debug!(model, chars = text.len(), "audio transcribed");
    Ok(text)
}

impl AfriTalk {
    pub async fn voice(&self, request: VoiceRequest) -> Result<VoiceResponse, AfriError> {
        self.voice_as(None, request).await
    }

    pub async fn voice_as(
        &self,
        caller: Option<&str>,
        request: VoiceRequest,
    ) -> Result<VoiceResponse, AfriError> {
        self.admit(caller)?;
        if request.audio.is_empty() {
            return Err(AfriError::InvalidInput("Audio is required.".to_string()));
        }
        let text = transcribe(
            self.provider.as_ref(),
            &self.retry,
            &self.models.audio,
            request.audio,
            request.mime_type.as_deref(),
            &CancelHandle::new(),
        )
        .await?;
        Ok(VoiceResponse { text })
    }

    /// Streamed transcription: one `transcription` chunk per provider delta,
    /// then `done`. The first failure ends the stream.
    pub fn voice_stream(&self, request: VoiceRequest) -> VoiceStream {
        self.voice_stream_as(None, request)
    }

    /// Like [`voice_stream`](Self::voice_stream); `caller` is charged against
    /// the rate limiter when the stream is first polled.
    pub fn voice_stream_as(&self, caller: Option<&str>, request: VoiceRequest) -> VoiceStream {
        let provider = self.provider.clone();
        let retry = self.retry.clone();
        let model = self.models.audio.clone();
        let limiter = self.rate_limiter.clone();
        let caller = caller.map(str::to_string);

        Box::pin(try_stream! {
            if let Some(limiter) = &limiter {
                limiter.check(caller.as_deref())?;
            }
            if request.audio.is_empty() {
                Err::<(), _>(AfriError::InvalidInput("Audio is required.".to_string()))?;
            }
            let generation = transcription_request(
                &model,
                STREAM_TRANSCRIBE_PROMPT,
                request.audio,
                request.mime_type.as_deref(),
            );
            let mut deltas = retry
                .execute(|| provider.generate_stream(generation.clone()))
                .await
                .map_err(AfriError::from)?;

            while let Some(delta) = deltas.next().await {
                let text = delta.map_err(AfriError::from)?;
                if text.is_empty() {
                    continue;
                }
                yield VoiceStreamChunk::Transcription { text, start: 0.0, end: 0.0 };
            }
            yield VoiceStreamChunk::Done;
        })
    }

    pub async fn speak(&self, request: SpeakRequest) -> Result<SpeakResponse, AfriError> {
        self.speak_as(None, request).await
    }

    pub async fn speak_as(
        &self,
        caller: Option<&str>,
        request: SpeakRequest,
    ) -> Result<SpeakResponse, AfriError> {
        self.admit(caller)?;
        if request.text.trim().is_empty() {
            return Err(AfriError::InvalidInput("Text is required.".to_string()));
        }

        let speech = SpeechRequest {
            model: self.models.tts.clone(),
            text: request.text,
            voice: provider_voice(request.voice.as_deref()).to_string(),
        };
        let audio = self
            .retry
            .execute(|| self.provider.synthesize_speech(speech.clone()))
            .await
            .map_err(AfriError::from)?;
        if audio.data.is_empty() {
            return Err(AfriError::EmptyResponse("No audio generated.".to_string()));
        }

        tracing::info!(voice = %speech.voice, bytes = audio.data.len(), "speech synthesized");
        Ok(SpeakResponse {
            audio_data: audio.data,
            content_type: audio.content_type,
        })
    }
}
