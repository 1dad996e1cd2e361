//! Translation.

use crate::client::AfriTalk;
use crate::error::AfriError;
use crate::language::canonicalize;
use crate::types::{
    AUTO_LANGUAGE, GenerationConfig, GenerationRequest, TranslateRequest, TranslateResponse,
};

const TRANSLATE_TEMPERATURE: f32 = 0.3;
const TRANSLATE_THINKING_BUDGET: u32 = 1024;

fn translation_instruction(target: &str, source: Option<&str>) -> String {
    let mut instruction =
        format!("Translate to {target}. Output ONLY the translated text. No pleasantries.");
    if let Some(source) = source {
        instruction.push_str(&format!(" Source: {source}"));
    }
    instruction
}

impl AfriTalk {
    pub async fn translate(
        &self,
        request: TranslateRequest,
    ) -> Result<TranslateResponse, AfriError> {
        self.translate_as(None, request).await
    }

    pub async fn translate_as(
        &self,
        caller: Option<&str>,
        request: TranslateRequest,
    ) -> Result<TranslateResponse, AfriError> {
        self.admit(caller)?;
        if request.text.trim().is_empty() || request.target_language.trim().is_empty() {
            return Err(AfriError::InvalidInput(
                "Text and targetLanguage are required.".to_string(),
            ));
        }

        let target = canonicalize(&request.target_language);
        let source = request
            .source_language
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let mut config = GenerationConfig::default().with_temperature(TRANSLATE_TEMPERATURE);
        let model = if request.use_reasoning {
            config = config.with_thinking_budget(TRANSLATE_THINKING_BUDGET);
            &self.models.reasoning
        } else {
            &self.models.text_basic
        };
        let generation = GenerationRequest::text(model.as_str(), request.text.as_str())
            .with_system_instruction(translation_instruction(&target, source))
            .with_config(config);

        let translated = self
            .retry
            .execute(|| self.provider.generate(generation.clone()))
            .await
            .map_err(AfriError::from)?;
        if translated.trim().is_empty() {
            return Err(AfriError::EmptyResponse("Empty AI response.".to_string()));
        }

        tracing::info!(target_language = %target, model = %model, "translation completed");
        Ok(TranslateResponse {
            translated_text: translated,
            source_language: source.unwrap_or(AUTO_LANGUAGE).to_string(),
            target_language: target,
        })
    }
}
