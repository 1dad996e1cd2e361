//! Client configuration.

use secrecy::SecretString;
use std::time::Duration;

use crate::error::AfriError;
use crate::rate_limit::RateLimitConfig;
use crate::retry::RetryPolicy;
use crate::streaming::DEFAULT_STREAM_BUFFER;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_LOCAL_MODEL_PORT: &str = "8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Model identifiers per task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSet {
    pub text_basic: String,
    pub reasoning: String,
    pub audio: String,
    pub tts: String,
    pub video: String,
    pub document: String,
}

impl Default for ModelSet {
    fn default() -> Self {
        Self {
            text_basic: "gemini-3-flash-preview".to_string(),
            reasoning: "gemini-3-pro-preview".to_string(),
            audio: "gemini-2.5-flash-native-audio-preview-12-2025".to_string(),
            tts: "gemini-2.5-flash-preview-tts".to_string(),
            video: "gemini-3-flash-preview".to_string(),
            document: "gemini-3-flash-preview".to_string(),
        }
    }
}

/// Which upstream provider the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Google,
    /// Self-hosted model behind a `/generate` endpoint.
    Local,
}

impl ProviderKind {
    /// Parse a provider name. Unknown names fall back to Google.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "" | "google" => ProviderKind::Google,
            "afritalk-local" => ProviderKind::Local,
            other => {
                tracing::warn!(
                    requested = other,
                    "requested provider not implemented, falling back to google"
                );
                ProviderKind::Google
            }
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Google => "google",
            ProviderKind::Local => "afritalk-local",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: SecretString,
    pub provider: ProviderKind,
    pub base_url: String,
    pub local_model_url: String,
    pub retry: RetryPolicy,
    pub timeout: Duration,
    pub models: ModelSet,
    pub stream_buffer: usize,
    /// Gate every call through a per-caller limiter when set.
    pub rate_limit: Option<RateLimitConfig>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            provider: ProviderKind::default(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            local_model_url: format!("http://localhost:{DEFAULT_LOCAL_MODEL_PORT}"),
            retry: RetryPolicy::default(),
            timeout: DEFAULT_TIMEOUT,
            models: ModelSet::default(),
            stream_buffer: DEFAULT_STREAM_BUFFER,
            rate_limit: None,
        }
    }

    /// Build from process environment.
    ///
    /// Reads `API_KEY`, `PROVIDER`, `LOCAL_MODEL_URL`, `LOCAL_MODEL_PORT`,
    /// `AFRITALK_MAX_RETRIES` and `AFRITALK_BASE_URL`.
    pub fn from_env() -> Result<Self, AfriError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AfriError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = var("API_KEY").ok_or_else(|| {
            AfriError::auth("Missing API Key. Pass it in the config or set API_KEY.")
        })?;
        let mut config = Self::new(api_key);

        if let Some(provider) = var("PROVIDER") {
            config.provider = ProviderKind::from_name(&provider);
        }
        if let Some(base_url) = var("AFRITALK_BASE_URL") {
            config.base_url = base_url;
        }
        config.local_model_url = match var("LOCAL_MODEL_URL") {
            Some(url) => url,
            None => {
                let port =
                    var("LOCAL_MODEL_PORT").unwrap_or_else(|| DEFAULT_LOCAL_MODEL_PORT.into());
                format!("http://localhost:{port}")
            }
        };
        if let Some(raw) = var("AFRITALK_MAX_RETRIES") {
            let max_retries = raw.trim().parse::<u32>().map_err(|_| {
                AfriError::InvalidConfig(format!(
                    "AFRITALK_MAX_RETRIES must be a non-negative integer, got '{raw}'."
                ))
            })?;
            config.retry = config.retry.with_max_retries(max_retries);
        }
        Ok(config)
    }

    pub fn with_provider(mut self, provider: ProviderKind) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_local_model_url(mut self, url: impl Into<String>) -> Self {
        self.local_model_url = url.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_models(mut self, models: ModelSet) -> Self {
        self.models = models;
        self
    }

    pub fn with_stream_buffer(mut self, buffer: usize) -> Self {
        self.stream_buffer = buffer;
        self
    }

    pub fn with_rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }
}
