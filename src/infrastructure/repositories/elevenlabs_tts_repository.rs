use super::tts_repository::{ProviderError, TtsRepository};
use crate::domain::tts::Voice;
use async_trait::async_trait;
use reqwest::{header, Client, Url};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Fixed voice settings; not exposed to callers.
const STABILITY: f32 = 0.5;
const SIMILARITY_BOOST: f32 = 0.75;

const API_KEY_HEADER: &str = "xi-api-key";

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

#[derive(Debug, Deserialize)]
struct VoicesResponse {
    voices: Vec<ProviderVoice>,
}

#[derive(Debug, Deserialize)]
struct ProviderVoice {
    voice_id: String,
    name: String,
    #[serde(default)]
    category: String,
}

impl From<ProviderVoice> for Voice {
    fn from(v: ProviderVoice) -> Self {
        Voice {
            id: v.voice_id,
            name: v.name,
            category: v.category,
        }
    }
}

/// ElevenLabs implementation of TTS repository
pub struct ElevenLabsTtsRepository {
    client: Client,
    base_url: Url,
    api_key: String,
    model_id: String,
}

impl ElevenLabsTtsRepository {
    pub fn new(
        base_url: String,
        api_key: String,
        model_id: String,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ProviderError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ProviderError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            client,
            base_url,
            api_key,
            model_id,
        })
    }

    /// Append path segments to the base URL. Each segment is percent-encoded
    /// on its own, so a `/`, `?` or `#` inside one cannot change the route.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ProviderError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn speech_url(&self, voice_id: &str) -> Result<Url, ProviderError> {
        self.endpoint(&["text-to-speech", voice_id])
    }

    fn voices_url(&self) -> Result<Url, ProviderError> {
        self.endpoint(&["voices"])
    }

    /// Turn a non-success response into a `ProviderError::Status`, keeping the body for logs.
    async fn status_error(response: reqwest::Response) -> ProviderError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        ProviderError::Status { status, body }
    }
}

#[async_trait]
impl TtsRepository for ElevenLabsTtsRepository {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, ProviderError> {
        let start_time = Instant::now();

        tracing::info!(
            voice_id = voice_id,
            model = %self.model_id,
            text_length = text.len(),
            text_preview = %text.chars().take(200).collect::<String>(),
            "Calling ElevenLabs text-to-speech"
        );

        let body = SpeechRequest {
            text,
            model_id: &self.model_id,
            voice_settings: VoiceSettings {
                stability: STABILITY,
                similarity_boost: SIMILARITY_BOOST,
            },
        };

        let response = self
            .client
            .post(self.speech_url(voice_id)?)
            .header(header::ACCEPT, "audio/mpeg")
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, voice_id = voice_id, "ElevenLabs request failed");
                ProviderError::Transport(e.to_string())
            })?;

        if !response.status().is_success() {
            let err = Self::status_error(response).await;
            tracing::error!(
                error = %err,
                voice_id = voice_id,
                "ElevenLabs API error"
            );
            return Err(err);
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?
            .to_vec();

        let duration = start_time.elapsed();
        tracing::info!(
            provider = "elevenlabs",
            model = %self.model_id,
            voice_id = voice_id,
            latency_ms = duration.as_millis(),
            characters_count = text.chars().count(),
            audio_size_bytes = audio.len(),
            "TTS synthesis completed"
        );

        Ok(audio)
    }

    async fn list_voices(&self) -> Result<Vec<Voice>, ProviderError> {
        let response = self
            .client
            .get(self.voices_url()?)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let err = Self::status_error(response).await;
            tracing::error!(error = %err, "Failed to fetch voices");
            return Err(err);
        }

        let data: VoicesResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Transport(format!("invalid voices payload: {}", e)))?;

        tracing::debug!(voice_count = data.voices.len(), "Voices fetched from ElevenLabs");

        Ok(data.voices.into_iter().map(Voice::from).collect())
    }
}
