//! Error Classifier
//!
//! Maps internal and upstream failures onto the fixed `AfriError` taxonomy.
//! Already-classified errors pass through untouched; everything else is
//! inspected for status codes and rate-limit/authentication indicators.

use super::provider::ProviderError;
use super::types::AfriError;

/// Classify any error value.
pub fn classify(error: &(dyn std::error::Error + 'static)) -> AfriError {
    if let Some(err) = error.downcast_ref::<AfriError>() {
        return err.clone();
    }
    if let Some(err) = error.downcast_ref::<ProviderError>() {
        return classify_provider_error(err);
    }
    if let Some(err) = error.downcast_ref::<reqwest::Error>() {
        return classify_provider_error(&ProviderError::from_reqwest(err));
    }
    classify_message(&error.to_string())
}

/// Classify a provider failure by status first, then by message.
pub fn classify_provider_error(error: &ProviderError) -> AfriError {
    match error {
        ProviderError::Status { status, message } => classify_status(*status, message),
        ProviderError::ConnectionReset(message) | ProviderError::Timeout(message) => {
            AfriError::transient(message.clone())
        }
        ProviderError::Aborted => AfriError::cancelled(),
        ProviderError::InvalidResponse(message)
        | ProviderError::Unsupported(message)
        | ProviderError::Other(message) => classify_message(message),
    }
}

fn classify_status(status: u16, message: &str) -> AfriError {
    let lower = message.to_lowercase();
    match status {
        401 => AfriError::auth("Invalid API Key."),
        429 => AfriError::RateLimit("Rate limit exceeded.".to_string()),
        // Quota envelopes arrive as 400/403 on some providers.
        400 | 403 if is_rate_limit_like(&lower) => {
            AfriError::RateLimit("Rate limit exceeded.".to_string())
        }
        403 => AfriError::forbidden("Forbidden: API key rejected by provider."),
        500..=599 => AfriError::transient(format!("provider http={status}: {message}")),
        _ => classify_message(&format!("http {status}: {message}")),
    }
}

/// Heuristic classification for errors that only carry a message.
pub fn classify_message(message: &str) -> AfriError {
    let lower = message.to_lowercase();
    if lower.contains("401") || lower.contains("unauthorized") || lower.contains("invalid api key")
    {
        return AfriError::auth("Invalid API Key.");
    }
    if lower.contains("429") || is_rate_limit_like(&lower) {
        return AfriError::RateLimit("Rate limit exceeded.".to_string());
    }
    let message = if message.trim().is_empty() {
        "unknown error".to_string()
    } else {
        message.to_string()
    };
    AfriError::internal(message)
}

fn is_rate_limit_like(lower: &str) -> bool {
    lower.contains("rate limit")
        || lower.contains("ratelimit")
        || lower.contains("rate_limit_exceeded")
        || lower.contains("resource_exhausted")
        || lower.contains("too many requests")
}

impl From<ProviderError> for AfriError {
    fn from(err: ProviderError) -> Self {
        classify_provider_error(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, InternalKind};

    #[test]
    fn classified_errors_pass_through() {
        let original = AfriError::DetectionFailed("Confidence too low.".into());
        assert_eq!(classify(&original), original);
    }

    #[test]
    fn provider_statuses_map_to_codes() {
        let cases = [
            (401, ErrorCode::AuthError),
            (403, ErrorCode::AuthError),
            (429, ErrorCode::RateLimit),
            (500, ErrorCode::InternalError),
            (503, ErrorCode::InternalError),
            (404, ErrorCode::InternalError),
        ];
        for (status, expected) in cases {
            let err = classify_provider_error(&ProviderError::from_status(status, "body"));
            assert_eq!(err.code(), expected, "status {status}");
        }
    }

    #[test]
    fn server_errors_are_tagged_transient() {
        let err: AfriError = ProviderError::from_status(502, "bad gateway").into();
        assert!(matches!(
            err,
            AfriError::Internal {
                kind: InternalKind::Transient,
                ..
            }
        ));
    }

    #[test]
    fn quota_envelope_on_403_is_rate_limit() {
        let err = classify_provider_error(&ProviderError::from_status(
            403,
            r#"{"error":{"status":"RESOURCE_EXHAUSTED"}}"#,
        ));
        assert_eq!(err.code(), ErrorCode::RateLimit);
    }

    #[test]
    fn forbidden_keeps_403_status() {
        let err = classify_provider_error(&ProviderError::from_status(403, "denied"));
        assert_eq!(err.status_code(), 403);
    }

    #[test]
    fn messages_are_inspected_for_indicators() {
        assert_eq!(
            classify_message("Request failed with status 401").code(),
            ErrorCode::AuthError
        );
        assert_eq!(
            classify_message("got 429 from upstream").code(),
            ErrorCode::RateLimit
        );
        assert_eq!(
            classify_message("socket closed").code(),
            ErrorCode::InternalError
        );
    }

    #[test]
    fn foreign_errors_are_wrapped_as_internal() {
        let io = std::io::Error::other("disk on fire");
        let err = classify(&io);
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), "disk on fire");
    }

    #[test]
    fn aborted_maps_to_cancelled() {
        assert!(classify_provider_error(&ProviderError::Aborted).is_cancelled());
    }
}
