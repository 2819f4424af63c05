//! Canned ElevenLabs responses.

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::TEST_API_KEY;

/// First bytes of an MP3 with an ID3 tag
pub const FAKE_MP3: &[u8] = &[0x49, 0x44, 0x33, 0x04, 0x00];

pub async fn mock_speech(server: &MockServer, voice_id: &str, audio: &[u8]) {
    Mock::given(method("POST"))
        .and(path(format!("/text-to-speech/{}", voice_id)))
        .and(header("xi-api-key", TEST_API_KEY))
        .and(header("accept", "audio/mpeg"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "audio/mpeg")
                .set_body_bytes(audio.to_vec()),
        )
        .mount(server)
        .await;
}

pub async fn mock_speech_failure(server: &MockServer, voice_id: &str, status: u16) {
    Mock::given(method("POST"))
        .and(path(format!("/text-to-speech/{}", voice_id)))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_json(json!({ "detail": { "status": "invalid_api_key" } })),
        )
        .mount(server)
        .await;
}

pub fn voices_body() -> Value {
    json!({
        "voices": [
            {
                "voice_id": "21m00Tcm4TlvDq8ikWAM",
                "name": "Rachel",
                "category": "premade",
                "labels": { "accent": "american" }
            },
            {
                "voice_id": "AZnzlk1XvdvUeBnXmlld",
                "name": "Domi",
                "category": "premade"
            }
        ]
    })
}

/// Voice catalog, answered at most `times` times
pub async fn mock_voices(server: &MockServer, times: u64) {
    Mock::given(method("GET"))
        .and(path("/voices"))
        .and(header("xi-api-key", TEST_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(voices_body()))
        .expect(times)
        .mount(server)
        .await;
}

pub async fn mock_voices_failure(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path("/voices"))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// JSON bodies of every speech request the provider received, in order
pub async fn forwarded_speech_requests(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path().starts_with("/text-to-speech/"))
        .map(|r| serde_json::from_slice(&r.body).expect("provider body is not JSON"))
        .collect()
}
