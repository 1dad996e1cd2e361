//! Chat request/response types

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Sentinel language value that asks for detection.
pub const AUTO_LANGUAGE: &str = "auto";

/// Longest accepted typed message, in characters.
pub const MAX_MESSAGE_CHARS: u64 = 32_000;

/// A loosely-specified chat request.
///
/// Either `message` or `audio` must resolve to non-empty text before generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = MAX_MESSAGE_CHARS))]
    pub message: Option<String>,
    /// Raw audio payload; transcribed and used as (part of) the message.
    #[serde(skip)]
    pub audio: Option<Bytes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_mime_type: Option<String>,
    /// Canonical id, free-form name, or `"auto"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_detect_language: Option<bool>,
    /// Minimum detection confidence; no gate when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 1.0), custom(function = "finite_threshold"))]
    pub detection_threshold: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_reasoning: Option<bool>,
}

// Range checks let NaN through.
fn finite_threshold(threshold: f32) -> Result<(), ValidationError> {
    if threshold.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("non_finite"))
    }
}

impl ChatRequest {
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn audio(audio: impl Into<Bytes>, mime_type: Option<&str>) -> Self {
        Self::default().with_audio(audio, mime_type)
    }

    pub fn with_audio(mut self, audio: impl Into<Bytes>, mime_type: Option<&str>) -> Self {
        self.audio = Some(audio.into());
        self.audio_mime_type = mime_type.map(str::to_string);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_dialect(mut self, dialect: impl Into<String>) -> Self {
        self.dialect = Some(dialect.into());
        self
    }

    pub const fn with_auto_detect(mut self, enabled: bool) -> Self {
        self.auto_detect_language = Some(enabled);
        self
    }

    pub const fn with_detection_threshold(mut self, threshold: f32) -> Self {
        self.detection_threshold = Some(threshold);
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub const fn with_reasoning(mut self, enabled: bool) -> Self {
        self.enable_reasoning = Some(enabled);
        self
    }

    pub fn auto_detect_requested(&self) -> bool {
        self.auto_detect_language.unwrap_or(false)
    }

    pub fn reasoning_requested(&self) -> bool {
        self.enable_reasoning.unwrap_or(false)
    }
}

/// Where the working message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    Audio,
}

/// Metadata attached to every chat response and to the first stream chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<String>,
    pub model: String,
    pub detected: bool,
    pub confidence: f32,
    pub timestamp: DateTime<Utc>,
    pub input_type: InputType,
}

/// Non-streaming chat result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub text: String,
    pub metadata: ResponseMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_deserializes_camel_case() {
        let req: ChatRequest = serde_json::from_value(serde_json::json!({
            "message": "Bawo ni?",
            "autoDetectLanguage": true,
            "detectionThreshold": 0.8,
            "enableReasoning": false
        }))
        .unwrap();
        assert_eq!(req.message.as_deref(), Some("Bawo ni?"));
        assert!(req.auto_detect_requested());
        assert_eq!(req.detection_threshold, Some(0.8));
        assert!(!req.reasoning_requested());
        assert!(req.audio.is_none());
    }

    #[test]
    fn threshold_out_of_range_fails_validation() {
        let req = ChatRequest::text("hi").with_detection_threshold(1.5);
        assert!(req.validate().is_err());
        let req = ChatRequest::text("hi").with_detection_threshold(0.5);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn non_finite_threshold_fails_validation() {
        for threshold in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let errors = ChatRequest::text("hi")
                .with_detection_threshold(threshold)
                .validate()
                .unwrap_err();
            assert!(errors.field_errors().contains_key("detection_threshold"));
        }
    }

    #[test]
    fn oversized_message_fails_validation() {
        let req = ChatRequest::text("a".repeat(MAX_MESSAGE_CHARS as usize + 1));
        assert!(req.validate().is_err());
    }

    #[test]
    fn metadata_omits_missing_dialect() {
        let metadata = ResponseMetadata {
            language: "yoruba".into(),
            dialect: None,
            model: "m".into(),
            detected: false,
            confidence: 1.0,
            timestamp: Utc::now(),
            input_type: InputType::Text,
        };
        let json = serde_json::to_value(&metadata).unwrap();
        assert!(json.get("dialect").is_none());
        assert_eq!(json["inputType"], "text");
    }
}
