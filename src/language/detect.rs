//! Language detection through a structured-output generation call.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::resolver::canonicalize;
use crate::error::{AfriError, ProviderError};
use crate::retry::RetryExecutor;
use crate::traits::GenerationProvider;
use crate::types::{GenerationConfig, GenerationRequest};
use crate::utils::CancelHandle;

pub const UNKNOWN_LANGUAGE: &str = "unknown";

const DETECTION_INSTRUCTION: &str =
    r#"Analyze the text. Return JSON: { "language": "string", "confidence": number }"#;

/// Outcome of a single detection call. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Canonical id when the label resolves, else the raw label.
    pub language: String,
    /// Always within `[0.0, 1.0]`.
    pub confidence: f32,
}

impl DetectionResult {
    pub fn unknown() -> Self {
        Self {
            language: UNKNOWN_LANGUAGE.to_string(),
            confidence: 0.0,
        }
    }
}

/// Schema for the `{ language, confidence }` classification.
pub fn detection_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "language": { "type": "STRING" },
            "confidence": { "type": "NUMBER" }
        },
        "required": ["language", "confidence"]
    })
}

pub fn detection_request(model: &str, message: &str) -> GenerationRequest {
    GenerationRequest::text(model, message)
        .with_system_instruction(DETECTION_INSTRUCTION)
        .with_config(
            GenerationConfig::default()
                .with_temperature(0.0)
                .with_json_schema(detection_schema()),
        )
}

/// Parse a detection answer. Anything malformed yields [`DetectionResult::unknown`].
pub fn parse_detection(raw: &str) -> DetectionResult {
    let body = strip_code_fence(raw.trim());
    let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) else {
        return DetectionResult::unknown();
    };

    let language = fields
        .get("language")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map_or_else(|| UNKNOWN_LANGUAGE.to_string(), canonicalize);

    let confidence = match fields.get("confidence") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    let confidence = if confidence.is_finite() {
        confidence.clamp(0.0, 1.0) as f32
    } else {
        0.0
    };

    DetectionResult {
        language,
        confidence,
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Runs detection against a provider, retrying transient failures.
pub struct LanguageDetector<'a> {
    provider: &'a dyn GenerationProvider,
    retry: &'a RetryExecutor,
}

impl<'a> LanguageDetector<'a> {
    pub fn new(provider: &'a dyn GenerationProvider, retry: &'a RetryExecutor) -> Self {
        Self { provider, retry }
    }

    /// Detect the language of `message` using `model`.
    ///
    /// Provider failures degrade to [`DetectionResult::unknown`]; only
    /// cancellation is reported as an error.
    pub async fn detect(
        &self,
        message: &str,
        model: &str,
        cancel: &CancelHandle,
    ) -> Result<DetectionResult, AfriError> {
        let request = detection_request(model, message);
        let outcome = self
            .retry
            .execute_cancellable(cancel, || self.provider.generate(request.clone()))
            .await;

        match outcome {
            Ok(raw) => {
                let result = parse_detection(&raw);
                tracing::debug!(
                    language = %result.language,
                    confidence = result.confidence,
                    "language detected"
                );
                Ok(result)
            }
            Err(ProviderError::Aborted) => Err(AfriError::cancelled()),
            Err(error) => {
                tracing::warn!(error = %error, "language detection failed, treating as unknown");
                Ok(DetectionResult::unknown())
            }
        }
    }
}
