//! Fully resolved per-request state.

use chrono::Utc;

use crate::types::{GenerationConfig, GenerationRequest, InputType, ResponseMetadata};

const CHAT_TEMPERATURE: f32 = 0.7;
const REASONING_THINKING_BUDGET: u32 = 2048;
const REASONING_MAX_OUTPUT_TOKENS: u32 = 4096;

/// Output of request preparation, owned by one in-flight request.
///
/// Immutable once built; [`into_generation`](Self::into_generation) consumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedContext {
    pub(crate) language: String,
    pub(crate) dialect: Option<String>,
    pub(crate) detected: bool,
    pub(crate) confidence: f32,
    pub(crate) model: String,
    pub(crate) system_prompt: String,
    pub(crate) message: String,
    pub(crate) input_type: InputType,
    pub(crate) reasoning: bool,
}

impl ResolvedContext {
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn dialect(&self) -> Option<&str> {
        self.dialect.as_deref()
    }

    pub const fn detected(&self) -> bool {
        self.detected
    }

    pub const fn confidence(&self) -> f32 {
        self.confidence
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn input_type(&self) -> InputType {
        self.input_type
    }

    /// Metadata record stamped with the current time.
    pub fn metadata(&self) -> ResponseMetadata {
        ResponseMetadata {
            language: self.language.clone(),
            dialect: self.dialect.clone(),
            model: self.model.clone(),
            detected: self.detected,
            confidence: self.confidence,
            timestamp: Utc::now(),
            input_type: self.input_type,
        }
    }

    /// The generation call for this request.
    pub fn into_generation(self) -> GenerationRequest {
        let mut config = GenerationConfig::default().with_temperature(CHAT_TEMPERATURE);
        if self.reasoning {
            config = config
                .with_thinking_budget(REASONING_THINKING_BUDGET)
                .with_max_output_tokens(REASONING_MAX_OUTPUT_TOKENS);
        }
        GenerationRequest::text(self.model, self.message)
            .with_system_instruction(self.system_prompt)
            .with_config(config)
    }
}
