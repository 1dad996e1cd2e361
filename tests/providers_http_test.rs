//! HTTP providers against a mock server.

use std::sync::Arc;
use std::time::Duration;

use afritalk::error::ProviderError;
use afritalk::prelude::*;
use afritalk::providers::{GeminiProvider, LocalModelProvider};
use futures::StreamExt;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "test-model";

fn gemini(server: &MockServer) -> GeminiProvider {
    GeminiProvider::new(SecretString::from("test-key"), Duration::from_secs(5))
        .unwrap()
        .with_base_url(&server.uri())
}

fn answer(parts: serde_json::Value) -> serde_json::Value {
    json!({ "candidates": [{ "content": { "role": "model", "parts": parts } }] })
}

#[tokio::test]
async fn gemini_generate_sends_key_and_skips_thoughts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/models/{MODEL}:generateContent")))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "systemInstruction": { "parts": [{ "text": "Be brief." }] },
            "contents": [{ "role": "user", "parts": [{ "text": "Sawubona" }] }],
            "generationConfig": { "thinkingConfig": { "thinkingBudget": 64 } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer(json!([
            { "text": "planning...", "thought": true },
            { "text": "Yebo, " },
            { "text": "sawubona!" }
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let request = GenerationRequest::text(MODEL, "Sawubona")
        .with_system_instruction("Be brief.")
        .with_config(GenerationConfig::default().with_thinking_budget(64));
    let text = gemini(&server).generate(request).await.unwrap();

    assert_eq!(text, "Yebo, sawubona!");
}

#[tokio::test]
async fn gemini_error_envelope_is_kept_in_the_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "code": 401, "message": "API key not valid.", "status": "UNAUTHENTICATED" }
        })))
        .mount(&server)
        .await;

    let err = gemini(&server)
        .generate(GenerationRequest::text(MODEL, "Hi"))
        .await
        .unwrap_err();

    match err {
        ProviderError::Status { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "UNAUTHENTICATED: API key not valid.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn gemini_stream_yields_one_increment_per_event() {
    let server = MockServer::start().await;
    let events = [
        answer(json!([{ "text": "Habari " }])),
        answer(json!([{ "text": "", "thought": false }])),
        answer(json!([{ "text": "yako" }])),
    ]
    .iter()
    .map(|event| format!("data: {event}\r\n\r\n"))
    .collect::<String>();

    Mock::given(method("POST"))
        .and(path(format!("/models/{MODEL}:streamGenerateContent")))
        .and(query_param("alt", "sse"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(events),
        )
        .mount(&server)
        .await;

    let stream = gemini(&server)
        .generate_stream(GenerationRequest::text(MODEL, "Habari?"))
        .await
        .unwrap();
    let deltas: Vec<String> = stream.map(Result::unwrap).collect().await;

    assert_eq!(deltas, vec!["Habari ".to_string(), "yako".to_string()]);
}

#[tokio::test]
async fn gemini_speech_decodes_inline_audio() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/tts-model:generateContent"))
        .and(body_partial_json(json!({
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": { "voiceConfig": { "prebuiltVoiceConfig": { "voiceName": "Puck" } } }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer(json!([
            { "inlineData": { "mimeType": "audio/L16;rate=24000", "data": "AQID" } }
        ]))))
        .mount(&server)
        .await;

    let audio = gemini(&server)
        .synthesize_speech(SpeechRequest {
            model: "tts-model".into(),
            text: "Jambo".into(),
            voice: "Puck".into(),
        })
        .await
        .unwrap();

    assert_eq!(audio.data.as_ref(), &[1u8, 2, 3]);
    assert_eq!(audio.content_type, "audio/pcm");
}

#[tokio::test]
async fn chat_through_gemini_retries_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(answer(json!([{ "text": "Ndewo!" }]))),
        )
        .with_priority(2)
        .mount(&server)
        .await;

    let talk = AfriTalk::with_provider(Arc::new(gemini(&server))).with_retry_policy(
        RetryPolicy::new()
            .with_base_delay(Duration::from_millis(1))
            .without_jitter(),
    );
    let response = talk
        .chat(ChatRequest::text("Kedu?").with_language("igbo"))
        .await
        .unwrap();

    assert_eq!(response.text, "Ndewo!");
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn chat_through_gemini_maps_invalid_key_to_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = AfriTalk::with_provider(Arc::new(gemini(&server)))
        .chat(ChatRequest::text("Hi").with_language("english"))
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::AuthError);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn local_provider_posts_a_flat_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .and(body_partial_json(json!({
            "prompt": "Sannu",
            "max_new_tokens": 128,
            "top_k": 50
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": "Yauwa" })))
        .mount(&server)
        .await;

    let local = LocalModelProvider::new(&server.uri(), Duration::from_secs(5)).unwrap();
    let text = local
        .generate(GenerationRequest::text("ignored", "Sannu"))
        .await
        .unwrap();
    assert_eq!(text, "Yauwa");

    let err = local
        .generate_stream(GenerationRequest::text("ignored", "Sannu"))
        .await
        .err()
        .unwrap();
    assert!(matches!(err, ProviderError::Unsupported(_)));
}
