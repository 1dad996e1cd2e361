//! Video analysis and document question answering.

use crate::client::AfriTalk;
use crate::error::AfriError;
use crate::language::canonicalize;
use crate::types::{
    DEFAULT_RESPONSE_LANGUAGE, DocumentAnswer, DocumentQuery, GenerationRequest,
    VideoAnalysisMetadata, VideoAnalysisRequest, VideoAnalysisResponse,
};

const DEFAULT_VIDEO_PROMPT: &str =
    "Describe what is happening in this video in detail, focusing on cultural elements.";

fn response_language(requested: Option<&str>) -> String {
    requested
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(canonicalize)
        .unwrap_or_else(|| DEFAULT_RESPONSE_LANGUAGE.to_string())
}

fn video_prompt(prompt: Option<&str>, language: &str) -> String {
    let prompt = prompt
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_VIDEO_PROMPT);
    if language == DEFAULT_RESPONSE_LANGUAGE {
        prompt.to_string()
    } else {
        format!("Respond in {language}. {prompt}")
    }
}

fn document_prompt(query: &str, language: &str) -> String {
    let mut prompt = format!("Based on the attached document, answer this query: {query}.");
    if language != DEFAULT_RESPONSE_LANGUAGE {
        prompt.push_str(&format!(" Answer in {language}."));
    }
    prompt.push_str(" If the answer is not in the document, say so.");
    prompt
}

impl AfriTalk {
    pub async fn video(
        &self,
        request: VideoAnalysisRequest,
    ) -> Result<VideoAnalysisResponse, AfriError> {
        self.video_as(None, request).await
    }

    pub async fn video_as(
        &self,
        caller: Option<&str>,
        request: VideoAnalysisRequest,
    ) -> Result<VideoAnalysisResponse, AfriError> {
        self.admit(caller)?;
        if request.video.is_empty() || request.mime_type.trim().is_empty() {
            return Err(AfriError::InvalidInput(
                "Video data and mimeType are required.".to_string(),
            ));
        }

        let language = response_language(request.language.as_deref());
        let model = self.models.video.clone();
        let generation = GenerationRequest::new(model.as_str())
            .with_inline_data(request.mime_type.trim(), request.video)
            .with_text(video_prompt(request.prompt.as_deref(), &language));

        let description = self
            .retry
            .execute(|| self.provider.generate(generation.clone()))
            .await
            .map_err(AfriError::from)?;
        let description = if description.trim().is_empty() {
            "No description generated.".to_string()
        } else {
            description
        };

        tracing::info!(language = %language, model = %model, "video analyzed");
        Ok(VideoAnalysisResponse {
            description,
            metadata: VideoAnalysisMetadata { language, model },
        })
    }

    pub async fn ask_document(&self, query: DocumentQuery) -> Result<DocumentAnswer, AfriError> {
        self.ask_document_as(None, query).await
    }

    pub async fn ask_document_as(
        &self,
        caller: Option<&str>,
        query: DocumentQuery,
    ) -> Result<DocumentAnswer, AfriError> {
        self.admit(caller)?;
        if query.document.is_empty() || query.mime_type.trim().is_empty() {
            return Err(AfriError::InvalidInput(
                "Document data and mimeType are required.".to_string(),
            ));
        }
        if query.query.trim().is_empty() {
            return Err(AfriError::InvalidInput("Query is required.".to_string()));
        }

        let language = response_language(query.language.as_deref());
        let generation = GenerationRequest::new(self.models.document.as_str())
            .with_inline_data(query.mime_type.trim(), query.document)
            .with_text(document_prompt(query.query.trim(), &language));

        let answer = self
            .retry
            .execute(|| self.provider.generate(generation.clone()))
            .await
            .map_err(AfriError::from)?;
        if answer.trim().is_empty() {
            return Err(AfriError::EmptyResponse("Empty AI response.".to_string()));
        }

        Ok(DocumentAnswer {
            answer,
            citations: Vec::new(),
        })
    }
}
