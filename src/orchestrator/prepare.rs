//! Request preparation.
//!
//! Turns a loosely-specified [`ChatRequest`] into a [`ResolvedContext`]:
//! transcription, validation, language resolution or detection, the
//! confidence gate, canonicalization, moderation, prompt assembly and model
//! selection run strictly in that order. Every failure is terminal; retries
//! only happen inside the provider calls.

use validator::Validate;

use super::context::ResolvedContext;
use crate::config::ModelSet;
use crate::error::AfriError;
use crate::executors::audio::transcribe;
use crate::language::{LanguageDetector, PromptCatalog, canonicalize, dialect_directive};
use crate::retry::RetryExecutor;
use crate::traits::{ContentModerator, GenerationProvider};
use crate::types::{AUTO_LANGUAGE, ChatRequest, InputType};
use crate::utils::CancelHandle;

/// Borrowed collaborators for one preparation.
pub struct RequestPreparer<'a> {
    pub(crate) provider: &'a dyn GenerationProvider,
    pub(crate) moderator: &'a dyn ContentModerator,
    pub(crate) catalog: &'a PromptCatalog,
    pub(crate) retry: &'a RetryExecutor,
    pub(crate) models: &'a ModelSet,
    pub(crate) cancel: &'a CancelHandle,
}

/// How the target language is chosen.
enum LanguageChoice {
    Explicit(String),
    Detect,
}

impl<'a> RequestPreparer<'a> {
    pub async fn prepare(&self, request: ChatRequest) -> Result<ResolvedContext, AfriError> {
        request.validate()?;

        // Audio input: the transcription becomes (part of) the message.
        let mut message = request.message.clone();
        let mut input_type = InputType::Text;
        if let Some(audio) = request.audio.clone() {
            let transcription = transcribe(
                self.provider,
                self.retry,
                &self.models.audio,
                audio,
                request.audio_mime_type.as_deref(),
                self.cancel,
            )
            .await?;
            message = Some(match message.filter(|m| !m.trim().is_empty()) {
                Some(text) => format!("{text}\n\n[Context from Audio]: {transcription}"),
                None => transcription,
            });
            input_type = InputType::Audio;
        }

        let message = match message {
            Some(m) if !m.trim().is_empty() => m,
            _ => return Err(AfriError::InvalidInput("Message required.".to_string())),
        };

        let model = self.select_model(&request);

        let (label, detected, confidence) = match self.language_choice(&request)? {
            LanguageChoice::Explicit(language) => (language, false, 1.0),
            LanguageChoice::Detect => {
                let detector = LanguageDetector::new(self.provider, self.retry);
                let result = detector.detect(&message, &model, self.cancel).await?;
                if let Some(threshold) = request.detection_threshold
                    && result.confidence < threshold
                {
                    tracing::info!(
                        confidence = result.confidence,
                        threshold,
                        "detection confidence below threshold"
                    );
                    return Err(AfriError::DetectionFailed("Confidence too low.".to_string()));
                }
                (result.language, true, result.confidence)
            }
        };

        let language = canonicalize(&label);

        let verdict = self.moderator.moderate(&message, &language).await;
        if !verdict.allowed {
            return Err(AfriError::safety_block(
                verdict.reason.unwrap_or_else(|| "policy".to_string()),
            ));
        }

        let dialect = request
            .dialect
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        let mut system_prompt = self.catalog.prompt_for(&language).into_owned();
        if let Some(dialect) = &dialect {
            system_prompt.push_str(&dialect_directive(dialect, &language));
        }

        tracing::debug!(
            language = %language,
            dialect = dialect.as_deref(),
            detected,
            confidence,
            model = %model,
            input_type = ?input_type,
            message_len = message.len(),
            "request prepared"
        );

        Ok(ResolvedContext {
            language,
            dialect,
            detected,
            confidence,
            model,
            system_prompt,
            message,
            input_type,
            reasoning: request.reasoning_requested(),
        })
    }

    /// Explicit language wins unless the auto-detect flag is set. The `auto`
    /// sentinel only triggers detection when no dialect is given.
    fn language_choice(&self, request: &ChatRequest) -> Result<LanguageChoice, AfriError> {
        let language = request
            .language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty());
        let has_dialect = request
            .dialect
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty());
        let is_auto = language.is_some_and(|l| l.eq_ignore_ascii_case(AUTO_LANGUAGE));

        if request.auto_detect_requested() || (is_auto && !has_dialect) {
            return Ok(LanguageChoice::Detect);
        }
        match language {
            Some(language) => {
                if is_auto {
                    tracing::warn!(
                        "language 'auto' with a dialect and no auto-detect flag; using the label as given"
                    );
                }
                Ok(LanguageChoice::Explicit(language.to_string()))
            }
            None => Err(AfriError::InvalidConfig("Language required.".to_string())),
        }
    }

    fn select_model(&self, request: &ChatRequest) -> String {
        match request.model.as_deref().map(str::trim) {
            Some(model) if !model.is_empty() => model.to_string(),
            _ if request.reasoning_requested() => self.models.reasoning.clone(),
            _ => self.models.text_basic.clone(),
        }
    }
}
