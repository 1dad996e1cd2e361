//! The orchestration context.
//!
//! [`AfriTalk`] is built once from a [`ClientConfig`] and shared by every
//! request. It owns the provider, moderator, retry policy, model set and the
//! optional rate limiter; the operations live in [`crate::executors`].

use std::sync::Arc;

use crate::config::{ClientConfig, ModelSet};
use crate::error::AfriError;
use crate::language::PromptCatalog;
use crate::orchestrator::{RequestPreparer, ResolvedContext};
use crate::providers::create_provider;
use crate::rate_limit::RateLimiter;
use crate::retry::{RetryExecutor, RetryPolicy};
use crate::streaming::DEFAULT_STREAM_BUFFER;
use crate::traits::{ContentModerator, GenerationProvider, KeywordModerator};
use crate::types::ChatRequest;
use crate::utils::CancelHandle;

#[derive(Clone)]
pub struct AfriTalk {
    pub(crate) provider: Arc<dyn GenerationProvider>,
    pub(crate) moderator: Arc<dyn ContentModerator>,
    pub(crate) catalog: &'static PromptCatalog,
    pub(crate) retry: RetryExecutor,
    pub(crate) models: ModelSet,
    pub(crate) rate_limiter: Option<Arc<RateLimiter>>,
    pub(crate) stream_buffer: usize,
}

static_assertions::assert_impl_all!(AfriTalk: Send, Sync, Clone);

impl std::fmt::Debug for AfriTalk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AfriTalk")
            .field("provider", &self.provider.provider_name())
            .field("retry", self.retry.policy())
            .field("models", &self.models)
            .field("rate_limited", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

impl AfriTalk {
    pub fn from_config(config: ClientConfig) -> Result<Self, AfriError> {
        let provider = create_provider(&config)?;
        let mut client = Self::with_provider(provider)
            .with_retry_policy(config.retry)
            .with_models(config.models)
            .with_stream_buffer(config.stream_buffer);
        if let Some(rate_limit) = config.rate_limit {
            client = client.with_rate_limiter(Arc::new(RateLimiter::new(rate_limit)));
        }
        Ok(client)
    }

    /// Build from `API_KEY`, `PROVIDER` and the other recognized variables.
    pub fn from_env() -> Result<Self, AfriError> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Client around an existing provider, with default policy and models.
    pub fn with_provider(provider: Arc<dyn GenerationProvider>) -> Self {
        Self {
            provider,
            moderator: Arc::new(KeywordModerator::default()),
            catalog: PromptCatalog::global(),
            retry: RetryExecutor::default(),
            models: ModelSet::default(),
            rate_limiter: None,
            stream_buffer: DEFAULT_STREAM_BUFFER,
        }
    }

    pub fn with_moderator(mut self, moderator: Arc<dyn ContentModerator>) -> Self {
        self.moderator = moderator;
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = RetryExecutor::new(policy);
        self
    }

    pub fn with_models(mut self, models: ModelSet) -> Self {
        self.models = models;
        self
    }

    /// Gate every caller-facing operation through `limiter`.
    pub fn with_rate_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }

    pub fn with_stream_buffer(mut self, buffer: usize) -> Self {
        self.stream_buffer = buffer.max(1);
        self
    }

    pub fn provider(&self) -> &Arc<dyn GenerationProvider> {
        &self.provider
    }

    pub fn models(&self) -> &ModelSet {
        &self.models
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        self.retry.policy()
    }

    pub fn rate_limiter(&self) -> Option<&Arc<RateLimiter>> {
        self.rate_limiter.as_ref()
    }

    /// Rate-limit gate; a no-op without a limiter.
    pub fn admit(&self, caller: Option<&str>) -> Result<(), AfriError> {
        match &self.rate_limiter {
            Some(limiter) => limiter.check(caller),
            None => Ok(()),
        }
    }

    /// Run request preparation without generating.
    pub async fn prepare(
        &self,
        request: ChatRequest,
        cancel: &CancelHandle,
    ) -> Result<ResolvedContext, AfriError> {
        self.preparer(cancel).prepare(request).await
    }

    pub(crate) fn preparer<'a>(&'a self, cancel: &'a CancelHandle) -> RequestPreparer<'a> {
        RequestPreparer {
            provider: self.provider.as_ref(),
            moderator: self.moderator.as_ref(),
            catalog: self.catalog,
            retry: &self.retry,
            models: &self.models,
            cancel,
        }
    }
}
