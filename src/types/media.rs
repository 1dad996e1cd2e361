//! Video analysis and document question answering types

use bytes::Bytes;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RESPONSE_LANGUAGE: &str = "english";

#[derive(Debug, Clone, Default)]
pub struct VideoAnalysisRequest {
    pub video: Bytes,
    /// Required, e.g. `video/mp4`.
    pub mime_type: String,
    pub prompt: Option<String>,
    /// Response language; `english` when absent.
    pub language: Option<String>,
}

impl VideoAnalysisRequest {
    pub fn new(video: impl Into<Bytes>, mime_type: impl Into<String>) -> Self {
        Self {
            video: video.into(),
            mime_type: mime_type.into(),
            ..Default::default()
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoAnalysisMetadata {
    pub language: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoAnalysisResponse {
    pub description: String,
    pub metadata: VideoAnalysisMetadata,
}

/// Question about an attached document (PDF, plain text, ...).
#[derive(Debug, Clone, Default)]
pub struct DocumentQuery {
    pub document: Bytes,
    pub mime_type: String,
    pub query: String,
    pub language: Option<String>,
}

impl DocumentQuery {
    pub fn new(
        document: impl Into<Bytes>,
        mime_type: impl Into<String>,
        query: impl Into<String>,
    ) -> Self {
        Self {
            document: document.into(),
            mime_type: mime_type.into(),
            query: query.into(),
            language: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAnswer {
    pub answer: String,
    #[serde(default)]
    pub citations: Vec<String>,
}
