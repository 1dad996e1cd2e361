//! Translation types

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    pub text: String,
    /// Canonical id or free-form language name.
    pub target_language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,
    #[serde(default)]
    pub use_reasoning: bool,
}

impl TranslateRequest {
    pub fn new(text: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_language: target_language.into(),
            ..Default::default()
        }
    }

    pub fn with_source_language(mut self, source: impl Into<String>) -> Self {
        self.source_language = Some(source.into());
        self
    }

    pub const fn with_reasoning(mut self, enabled: bool) -> Self {
        self.use_reasoning = enabled;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub translated_text: String,
    /// The supplied source language, or `"auto"`.
    pub source_language: String,
    /// Canonicalized target.
    pub target_language: String,
}
