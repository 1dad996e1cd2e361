//! Type Conversions for AfriError and ProviderError
//!
//! From trait implementations for converting common error types.

use super::provider::ProviderError;
use super::types::AfriError;

impl ProviderError {
    pub(crate) fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout(err.to_string());
        }
        if let Some(status) = err.status() {
            return Self::Status {
                status: status.as_u16(),
                message: err.to_string(),
            };
        }
        if err.is_connect() || err.is_request() {
            return Self::ConnectionReset(err.to_string());
        }
        if err.is_decode() || err.is_body() {
            return Self::InvalidResponse(err.to_string());
        }
        Self::Other(err.to_string())
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self::from_reqwest(&err)
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}

impl From<serde_json::Error> for AfriError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(format!("json error: {err}"))
    }
}

impl From<validator::ValidationErrors> for AfriError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Detection thresholds are configuration, not message content.
        if errors.field_errors().contains_key("detection_threshold") {
            Self::InvalidConfig(
                "detectionThreshold must be between 0.0 and 1.0.".to_string(),
            )
        } else if errors.field_errors().contains_key("message") {
            Self::InvalidInput(format!(
                "Message exceeds {} characters.",
                crate::types::MAX_MESSAGE_CHARS
            ))
        } else {
            Self::InvalidInput(errors.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: AfriError = json_err.into();
        assert!(matches!(err, AfriError::Internal { .. }));

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ProviderError = json_err.into();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }
}
