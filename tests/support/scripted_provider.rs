//! In-memory provider driven by a queue of scripted replies.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use afritalk::error::ProviderError;
use afritalk::prelude::*;
use afritalk::traits::TextStream;
use async_trait::async_trait;
use bytes::Bytes;

pub enum Reply {
    Text(String),
    Fail(ProviderError),
    Stream(Vec<Result<String, ProviderError>>),
    Speech(Bytes),
}

#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<GenerationRequest>>,
    speech_requests: Mutex<Vec<SpeechRequest>>,
}

impl ScriptedProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, reply: Reply) -> &Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn text(&self, text: &str) -> &Self {
        self.push(Reply::Text(text.to_string()))
    }

    pub fn fail_status(&self, status: u16) -> &Self {
        self.push(Reply::Fail(ProviderError::from_status(status, "scripted failure")))
    }

    pub fn stream(&self, deltas: &[&str]) -> &Self {
        self.push(Reply::Stream(
            deltas.iter().map(|d| Ok(d.to_string())).collect(),
        ))
    }

    pub fn detection(&self, language: &str, confidence: f32) -> &Self {
        self.text(&format!(
            r#"{{"language": "{language}", "confidence": {confidence}}}"#
        ))
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len() + self.speech_requests.lock().unwrap().len()
    }

    pub fn speech_requests(&self) -> Vec<SpeechRequest> {
        self.speech_requests.lock().unwrap().clone()
    }

    fn next(&self) -> Option<Reply> {
        self.replies.lock().unwrap().pop_front()
    }
}

#[async_trait]
impl GenerationProvider for ScriptedProvider {
    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError> {
        self.requests.lock().unwrap().push(request);
        match self.next() {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Fail(err)) => Err(err),
            _ => Err(ProviderError::Other("no scripted text reply".into())),
        }
    }

    async fn generate_stream(
        &self,
        request: GenerationRequest,
    ) -> Result<TextStream, ProviderError> {
        self.requests.lock().unwrap().push(request);
        match self.next() {
            Some(Reply::Stream(items)) => Ok(Box::pin(futures::stream::iter(items))),
            Some(Reply::Fail(err)) => Err(err),
            _ => Err(ProviderError::Other("no scripted stream reply".into())),
        }
    }

    async fn synthesize_speech(
        &self,
        request: SpeechRequest,
    ) -> Result<SpeechAudio, ProviderError> {
        self.speech_requests.lock().unwrap().push(request);
        match self.next() {
            Some(Reply::Speech(data)) => Ok(SpeechAudio {
                data,
                content_type: "audio/pcm".to_string(),
            }),
            Some(Reply::Fail(err)) => Err(err),
            _ => Err(ProviderError::Other("no scripted speech reply".into())),
        }
    }
}

/// Millisecond backoff without jitter.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy::new()
        .with_max_retries(3)
        .with_base_delay(Duration::from_millis(1))
        .without_jitter()
}

pub fn client(provider: &Arc<ScriptedProvider>) -> AfriTalk {
    AfriTalk::with_provider(provider.clone()).with_retry_policy(fast_retry())
}
