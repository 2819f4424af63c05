use async_trait::async_trait;
use moka::future::Cache;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::domain::playback::{PlaybackError, SynthesisGateway};
use crate::domain::tts::{ConvertRequest, ConvertResponse, Voice};
use crate::error::ErrorResponse;

const VOICES_CACHE_KEY: &str = "voices";

/// Talks to a running gateway over HTTP (`/api/tts/*`).
///
/// Keeps its own short-lived copy of the voice catalog so a UI can ask on
/// every render without a round trip.
pub struct HttpSynthesisGateway {
    client: Client,
    base_url: String,
    voices_cache: Cache<&'static str, Vec<Voice>>,
}

impl HttpSynthesisGateway {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        voices_cache_ttl: Duration,
    ) -> Result<Self, PlaybackError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(PlaybackError::provider)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            voices_cache: Cache::builder()
                .max_capacity(1)
                .time_to_live(voices_cache_ttl)
                .build(),
        })
    }

    /// Map a gateway error response onto the client taxonomy
    async fn error_from(response: reqwest::Response) -> PlaybackError {
        let status = response.status();
        let message = response
            .json::<ErrorResponse>()
            .await
            .map(|e| e.message)
            .unwrap_or_else(|_| status.to_string());

        match status {
            StatusCode::BAD_REQUEST | StatusCode::PAYLOAD_TOO_LARGE => {
                PlaybackError::Validation(message)
            }
            _ => PlaybackError::Provider {
                status: Some(status.as_u16()),
                message,
            },
        }
    }
}

#[async_trait]
impl SynthesisGateway for HttpSynthesisGateway {
    async fn convert(
        &self,
        text: &str,
        voice_id: Option<&str>,
    ) -> Result<ConvertResponse, PlaybackError> {
        let request = ConvertRequest {
            text: text.to_string(),
            voice_id: voice_id.map(str::to_string),
        };

        let response = self
            .client
            .post(format!("{}/api/tts/convert", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(PlaybackError::provider)?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        response
            .json::<ConvertResponse>()
            .await
            .map_err(|e| PlaybackError::provider(format!("invalid gateway response: {}", e)))
    }

    async fn voices(&self) -> Result<Vec<Voice>, PlaybackError> {
        if let Some(cached) = self.voices_cache.get(&VOICES_CACHE_KEY).await {
            return Ok(cached);
        }

        let response = self
            .client
            .get(format!("{}/api/tts/voices", self.base_url))
            .send()
            .await
            .map_err(|e| PlaybackError::Provider {
                status: None,
                message: format!("Failed to fetch voices: {}", e),
            })?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let voices: Vec<Voice> = response
            .json()
            .await
            .map_err(|e| PlaybackError::Provider {
                status: None,
                message: format!("Failed to fetch voices: invalid response: {}", e),
            })?;

        self.voices_cache
            .insert(VOICES_CACHE_KEY, voices.clone())
            .await;

        Ok(voices)
    }
}
