//! Voice and speech types

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Audio to transcribe.
#[derive(Debug, Clone, Default)]
pub struct VoiceRequest {
    pub audio: Bytes,
    /// Sniffed from the payload when absent, falling back to `audio/mp3`.
    pub mime_type: Option<String>,
}

impl VoiceRequest {
    pub fn new(audio: impl Into<Bytes>) -> Self {
        Self {
            audio: audio.into(),
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceResponse {
    pub text: String,
}

/// Incremental transcription event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum VoiceStreamChunk {
    Transcription { text: String, start: f64, end: f64 },
    Done,
}

/// Text-to-speech request. `voice` uses OpenAI-style names (`alloy`, `echo`, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeakRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
}

impl SpeakRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: None,
        }
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakResponse {
    pub audio_data: Bytes,
    pub content_type: String,
}
