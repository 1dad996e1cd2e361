//! Streamed chat: chunk ordering, failures and cancellation.

#[path = "support/scripted_provider.rs"]
mod support;

use afritalk::error::ProviderError;
use afritalk::prelude::*;
use futures::StreamExt;
use support::{Reply, ScriptedProvider, client};

fn swahili(message: &str) -> ChatRequest {
    ChatRequest::text(message).with_language("swahili")
}

#[tokio::test]
async fn metadata_comes_first_and_done_last() {
    let provider = ScriptedProvider::new();
    provider.stream(&["Habari ", "", "njema"]);

    let chunks = client(&provider)
        .chat_stream(swahili("Habari?"))
        .await
        .unwrap()
        .collect()
        .await;

    assert_eq!(chunks.len(), 4);
    match &chunks[0] {
        StreamChunk::Metadata { data } => {
            assert_eq!(data.language, "swahili");
            assert_eq!(data.input_type, InputType::Text);
        }
        other => panic!("expected metadata, got {other:?}"),
    }
    assert_eq!(chunks[1], StreamChunk::content("Habari "));
    assert_eq!(chunks[2], StreamChunk::content("njema"));
    assert_eq!(chunks[3], StreamChunk::Done);
}

#[tokio::test]
async fn preparation_errors_are_returned_before_streaming() {
    let provider = ScriptedProvider::new();
    let err = client(&provider)
        .chat_stream(ChatRequest::text(""))
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::InvalidInput);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn open_failure_becomes_a_terminal_error_chunk() {
    let provider = ScriptedProvider::new();
    provider.fail_status(401);

    let chunks = client(&provider)
        .chat_stream(swahili("Habari?"))
        .await
        .unwrap()
        .collect()
        .await;

    assert_eq!(chunks.len(), 2);
    assert!(matches!(chunks[0], StreamChunk::Metadata { .. }));
    assert!(matches!(
        chunks[1],
        StreamChunk::Error { error: ErrorCode::AuthError, .. }
    ));
}

#[tokio::test]
async fn open_is_retried_on_server_errors() {
    let provider = ScriptedProvider::new();
    provider.fail_status(502).stream(&["sawa"]);

    let chunks = client(&provider)
        .chat_stream(swahili("Habari?"))
        .await
        .unwrap()
        .collect()
        .await;

    assert_eq!(chunks[1], StreamChunk::content("sawa"));
    assert_eq!(chunks.last(), Some(&StreamChunk::Done));
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn mid_stream_failure_ends_with_an_error_chunk() {
    let provider = ScriptedProvider::new();
    provider.push(Reply::Stream(vec![
        Ok("Habari".to_string()),
        Err(ProviderError::ConnectionReset("peer closed".into())),
        Ok("never".to_string()),
    ]));

    let chunks: Vec<StreamChunk> = client(&provider)
        .chat_stream(swahili("Habari?"))
        .await
        .unwrap()
        .into_stream()
        .collect()
        .await;

    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[1], StreamChunk::content("Habari"));
    assert!(chunks[2].is_terminal());
    assert!(matches!(
        chunks[2],
        StreamChunk::Error { error: ErrorCode::InternalError, .. }
    ));
}

#[tokio::test]
async fn cancelled_stream_delivers_nothing_more() {
    let provider = ScriptedProvider::new();
    provider.stream(&["a", "b", "c"]);

    let cancel = CancelHandle::new();
    let mut receiver = client(&provider)
        .chat_stream_with_cancel(None, swahili("Habari?"), cancel.clone())
        .await
        .unwrap();

    cancel.cancel();
    assert_eq!(receiver.recv().await, None);
}

#[tokio::test]
async fn cancelling_before_preparation_aborts_detection() {
    let provider = ScriptedProvider::new();
    provider.detection("swahili", 0.9);

    let cancel = CancelHandle::new();
    cancel.cancel();
    let err = client(&provider)
        .chat_stream_with_cancel(None, ChatRequest::text("Habari?").with_auto_detect(true), cancel)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(provider.calls(), 0);
}
