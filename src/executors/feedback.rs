//! User feedback on generated output.

use uuid::Uuid;

use crate::client::AfriTalk;
use crate::error::AfriError;
use crate::types::{FeedbackRequest, FeedbackResponse};

impl AfriTalk {
    /// Record feedback. Only lengths and labels are logged, never the texts.
    pub async fn feedback(&self, request: FeedbackRequest) -> Result<FeedbackResponse, AfriError> {
        if request.input.trim().is_empty() || request.output.trim().is_empty() {
            return Err(AfriError::InvalidInput(
                "Input and output are required.".to_string(),
            ));
        }

        let id = request
            .request_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        tracing::info!(
            feedback_id = %id,
            rating = ?request.rating,
            language = %request.language,
            correction_len = request.correction.as_deref().map_or(0, str::len),
            "feedback received"
        );

        Ok(FeedbackResponse { success: true, id })
    }
}
