//! Voice, speech, translation, media and feedback operations.

#[path = "support/scripted_provider.rs"]
mod support;

use std::sync::Arc;

use afritalk::prelude::*;
use bytes::Bytes;
use futures::StreamExt;
use support::{Reply, ScriptedProvider, client};

#[tokio::test]
async fn translate_canonicalizes_the_target_and_defaults_the_source() {
    let provider = ScriptedProvider::new();
    provider.text("Ẹ káàrọ̀");

    let response = client(&provider)
        .translate(TranslateRequest::new("Good morning", "Yorùbá"))
        .await
        .unwrap();

    assert_eq!(response.translated_text, "Ẹ káàrọ̀");
    assert_eq!(response.target_language, "yoruba");
    assert_eq!(response.source_language, "auto");

    let request = &provider.requests()[0];
    assert_eq!(request.config.temperature, Some(0.3));
    assert_eq!(request.config.thinking_budget, None);
    assert_eq!(
        request.system_instruction.as_deref(),
        Some("Translate to yoruba. Output ONLY the translated text. No pleasantries.")
    );
}

#[tokio::test]
async fn translate_with_reasoning_uses_the_reasoning_model() {
    let provider = ScriptedProvider::new();
    provider.text("Sannu");

    let talk = client(&provider);
    let response = talk
        .translate(
            TranslateRequest::new("Hello", "hausa")
                .with_source_language("english")
                .with_reasoning(true),
        )
        .await
        .unwrap();

    assert_eq!(response.source_language, "english");
    let request = &provider.requests()[0];
    assert_eq!(request.model, talk.models().reasoning);
    assert_eq!(request.config.thinking_budget, Some(1024));
    assert!(request.system_instruction.as_deref().unwrap().ends_with("Source: english"));
}

#[tokio::test]
async fn translate_requires_text_and_target() {
    let provider = ScriptedProvider::new();
    let err = client(&provider)
        .translate(TranslateRequest::new("Hello", " "))
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::InvalidInput);
    assert_eq!(err.message(), "Text and targetLanguage are required.");
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn speak_maps_the_voice_and_returns_pcm() {
    let provider = ScriptedProvider::new();
    provider.push(Reply::Speech(Bytes::from_static(b"\x01\x02\x03")));

    let talk = client(&provider);
    let response = talk
        .speak(SpeakRequest::new("Jambo").with_voice("nova"))
        .await
        .unwrap();

    assert_eq!(response.audio_data, Bytes::from_static(b"\x01\x02\x03"));
    assert_eq!(response.content_type, "audio/pcm");
    let speech = &provider.speech_requests()[0];
    assert_eq!(speech.voice, "Zephyr");
    assert_eq!(speech.model, talk.models().tts);
}

#[tokio::test]
async fn speak_rejects_empty_text_and_empty_audio() {
    let provider = ScriptedProvider::new();
    let talk = client(&provider);

    let err = talk.speak(SpeakRequest::new("  ")).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidInput);
    assert_eq!(err.message(), "Text is required.");

    provider.push(Reply::Speech(Bytes::new()));
    let err = talk.speak(SpeakRequest::new("Jambo")).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::EmptyResponse);
    assert_eq!(provider.speech_requests()[0].voice, "Kore");
}

#[tokio::test]
async fn voice_transcribes_with_the_audio_model() {
    let provider = ScriptedProvider::new();
    provider.text("Ndewo");

    let talk = client(&provider);
    let response = talk
        .voice(VoiceRequest::new(&b"\x00\x00\x00"[..]))
        .await
        .unwrap();

    assert_eq!(response.text, "Ndewo");
    let request = &provider.requests()[0];
    assert_eq!(request.model, talk.models().audio);
    assert!(matches!(
        &request.parts[0],
        Part::InlineData { mime_type, .. } if mime_type == "audio/mp3"
    ));
}

#[tokio::test]
async fn voice_stream_yields_segments_then_done() {
    let provider = ScriptedProvider::new();
    provider.stream(&["Habari ", "yako"]);

    let chunks: Vec<_> = client(&provider)
        .voice_stream(VoiceRequest::new(&b"\x00"[..]).with_mime_type("audio/ogg"))
        .collect()
        .await;

    assert_eq!(chunks.len(), 3);
    assert_eq!(
        chunks[0].as_ref().unwrap(),
        &VoiceStreamChunk::Transcription {
            text: "Habari ".into(),
            start: 0.0,
            end: 0.0
        }
    );
    assert_eq!(chunks[2].as_ref().unwrap(), &VoiceStreamChunk::Done);
    assert_eq!(provider.requests()[0].prompt_text(), "Transcribe this audio.");
}

#[tokio::test]
async fn voice_stream_stops_at_the_first_error() {
    let provider = ScriptedProvider::new();
    provider.fail_status(403);

    let chunks: Vec<_> = client(&provider)
        .voice_stream(VoiceRequest::new(&b"\x00"[..]))
        .collect()
        .await;

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].as_ref().unwrap_err().status_code(), 403);
}

#[tokio::test]
async fn voice_stream_charges_its_caller_when_first_polled() {
    let provider = ScriptedProvider::new();
    provider.stream(&["sawa"]);
    let limiter = Arc::new(RateLimiter::new(RateLimitConfig {
        max_requests: 1,
        ..Default::default()
    }));
    let talk = client(&provider).with_rate_limiter(limiter.clone());

    let mut stream = talk.voice_stream_as(Some("key-a"), VoiceRequest::new(&b"\x00"[..]));
    assert!(limiter.is_empty());

    let first = stream.next().await.unwrap().unwrap();
    assert!(matches!(first, VoiceStreamChunk::Transcription { .. }));
    assert_eq!(limiter.len(), 1);

    // The same caller is over budget; another stream for it fails up front.
    let rejected: Vec<_> = talk
        .voice_stream_as(Some("key-a"), VoiceRequest::new(&b"\x00"[..]))
        .collect()
        .await;
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].as_ref().unwrap_err().code(), ErrorCode::RateLimit);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn video_prompt_is_prefixed_with_the_response_language() {
    let provider = ScriptedProvider::new();
    provider.text("Abantu bayadansa.");

    let talk = client(&provider);
    let response = talk
        .video(VideoAnalysisRequest::new(&b"\x00\x00"[..], "video/mp4").with_language("isiZulu"))
        .await
        .unwrap();

    assert_eq!(response.description, "Abantu bayadansa.");
    assert_eq!(response.metadata.language, "zulu");
    assert_eq!(response.metadata.model, talk.models().video);
    assert!(
        provider.requests()[0]
            .prompt_text()
            .starts_with("Respond in zulu. Describe what is happening")
    );
}

#[tokio::test]
async fn video_without_output_gets_a_placeholder() {
    let provider = ScriptedProvider::new();
    provider.text("");

    let response = client(&provider)
        .video(VideoAnalysisRequest::new(&b"\x00"[..], "video/mp4").with_prompt("Who is singing?"))
        .await
        .unwrap();

    assert_eq!(response.description, "No description generated.");
    assert_eq!(response.metadata.language, "english");
    assert_eq!(provider.requests()[0].prompt_text(), "Who is singing?");
}

#[tokio::test]
async fn video_requires_bytes_and_mime_type() {
    let provider = ScriptedProvider::new();
    let err = client(&provider)
        .video(VideoAnalysisRequest::new(Bytes::new(), "video/mp4"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidInput);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn documents_are_answered_in_the_requested_language() {
    let provider = ScriptedProvider::new();
    provider.text("Mkataba ulisainiwa 1964.");

    let answer = client(&provider)
        .ask_document(
            DocumentQuery::new(&b"%PDF-1.4"[..], "application/pdf", "When was it signed?")
                .with_language("swahili"),
        )
        .await
        .unwrap();

    assert_eq!(answer.answer, "Mkataba ulisainiwa 1964.");
    assert!(answer.citations.is_empty());
    let prompt = provider.requests()[0].prompt_text();
    assert!(prompt.contains("answer this query: When was it signed?."));
    assert!(prompt.contains("Answer in swahili."));
}

#[tokio::test]
async fn feedback_keeps_the_request_id_or_generates_one() {
    let provider = ScriptedProvider::new();
    let talk = client(&provider);
    let request = FeedbackRequest {
        request_id: Some("req-42".into()),
        input: "Bawo ni?".into(),
        output: "Dada ni".into(),
        rating: FeedbackRating::Negative,
        correction: Some("Mo wa dada".into()),
        language: "yoruba".into(),
    };

    let response = talk.feedback(request.clone()).await.unwrap();
    assert!(response.success);
    assert_eq!(response.id, "req-42");

    let generated = talk
        .feedback(FeedbackRequest {
            request_id: None,
            ..request
        })
        .await
        .unwrap();
    assert_eq!(generated.id.len(), 36);
    assert_eq!(provider.calls(), 0);
}
