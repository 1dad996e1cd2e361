//! Gemini server-sent event streaming.
//!
//! `streamGenerateContent?alt=sse` emits one `GenerateContentResponse` per
//! event. Each event's answer text becomes one increment; an error payload or
//! a broken transport ends the stream with an error item.

use eventsource_stream::{EventStreamError, Eventsource};
use futures::StreamExt;

use super::types::{ErrorEnvelope, GenerateContentResponse};
use crate::error::ProviderError;
use crate::traits::TextStream;

pub(crate) fn into_text_stream(response: reqwest::Response) -> TextStream {
    Box::pin(async_stream::stream! {
        let mut events = std::pin::pin!(response.bytes_stream().eventsource());
        while let Some(event) = events.next().await {
            let event = match event {
                Ok(event) => event,
                Err(EventStreamError::Transport(err)) => {
                    yield Err(ProviderError::from(err));
                    break;
                }
                Err(err) => {
                    yield Err(ProviderError::InvalidResponse(format!("sse parse error: {err}")));
                    break;
                }
            };
            match parse_event(&event.data) {
                Ok(Some(text)) => yield Ok(text),
                Ok(None) => {}
                Err(err) => {
                    yield Err(err);
                    break;
                }
            }
        }
    })
}

/// Text carried by one event; `None` for keep-alives and empty increments.
fn parse_event(data: &str) -> Result<Option<String>, ProviderError> {
    let data = data.trim();
    if data.is_empty() || data == "[DONE]" {
        return Ok(None);
    }
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(data) {
        return Err(ProviderError::Other(format!(
            "stream error: {}",
            envelope.error.message
        )));
    }
    let chunk: GenerateContentResponse = serde_json::from_str(data)?;
    let text = chunk.text();
    Ok((!text.is_empty()).then_some(text))
}
