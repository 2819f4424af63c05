use super::dto::Voice;
use super::error::TtsServiceError;
use super::text::{truncate_for_provider, validate_text};
use crate::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

pub const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

const VOICES_CACHE_KEY: &str = "voices";

/// Provider voice ids are short opaque tokens; anything else never reaches the provider URL.
const MAX_VOICE_ID_CHARS: usize = 64;

fn is_valid_voice_id(voice_id: &str) -> bool {
    (1..=MAX_VOICE_ID_CHARS).contains(&voice_id.len())
        && voice_id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

#[derive(Debug, Clone)]
pub struct TtsSynthesisResult {
    pub audio_data: Vec<u8>,
    pub content_type: &'static str,
    pub voice_id: String,
    pub char_count: usize,
    /// Whether the provider only saw a prefix of the input. Logged, never returned to callers.
    pub truncated: bool,
}

pub struct TtsService {
    tts_repo: Arc<dyn TtsRepository>,
    default_voice_id: String,
    voices_cache: Cache<&'static str, Vec<Voice>>,
}

impl TtsService {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        default_voice_id: String,
        voices_cache_ttl: Duration,
    ) -> Self {
        let voices_cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(voices_cache_ttl)
            .build();

        Self {
            tts_repo,
            default_voice_id,
            voices_cache,
        }
    }

    pub fn default_voice_id(&self) -> &str {
        &self.default_voice_id
    }

    /// An absent or blank voice id falls back to the default voice
    fn resolve_voice(&self, voice_id: Option<String>) -> Result<String, TtsServiceError> {
        let voice_id = voice_id
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.default_voice_id.clone());

        if !is_valid_voice_id(&voice_id) {
            tracing::warn!(voice_id_length = voice_id.len(), "Rejected malformed voice id");
            return Err(TtsServiceError::Invalid("Invalid voice id".to_string()));
        }

        Ok(voice_id)
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Synthesize text to speech
    ///
    /// This operation:
    /// - Validates the text is 1..=10,000 characters (before any provider call)
    /// - Rejects voice ids outside `[A-Za-z0-9_-]{1,64}`
    /// - Truncates to the provider limit of 5,000 characters
    /// - Calls the provider once; provider failures are not retried
    async fn synthesize(
        &self,
        text: String,
        voice_id: Option<String>,
    ) -> Result<TtsSynthesisResult, TtsServiceError>;

    /// Voice catalog, served from cache while fresh
    async fn list_voices(&self) -> Result<Vec<Voice>, TtsServiceError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn synthesize(
        &self,
        text: String,
        voice_id: Option<String>,
    ) -> Result<TtsSynthesisResult, TtsServiceError> {
        // 1. Validate bounds
        let char_count = validate_text(&text)?;

        // 2. Resolve voice and cut to the provider limit
        let voice_id = self.resolve_voice(voice_id)?;
        let text_to_convert = truncate_for_provider(&text);
        let truncated = text_to_convert.len() < text.len();

        tracing::info!(
            voice_id = %voice_id,
            char_count = char_count,
            truncated = truncated,
            "TTS synthesis request"
        );

        // 3. Call provider
        let audio_data = self
            .tts_repo
            .synthesize(text_to_convert, &voice_id)
            .await
            .map_err(|e| TtsServiceError::provider("Failed to convert text to speech", e))?;

        Ok(TtsSynthesisResult {
            audio_data,
            content_type: AUDIO_CONTENT_TYPE,
            voice_id,
            char_count,
            truncated,
        })
    }

    async fn list_voices(&self) -> Result<Vec<Voice>, TtsServiceError> {
        if let Some(cached) = self.voices_cache.get(&VOICES_CACHE_KEY).await {
            tracing::debug!(voice_count = cached.len(), "Voice catalog cache hit");
            return Ok(cached);
        }

        // Errors are not cached; a later call retries the provider
        let voices = self
            .tts_repo
            .list_voices()
            .await
            .map_err(|e| TtsServiceError::provider("Failed to fetch voices", e))?;

        self.voices_cache
            .insert(VOICES_CACHE_KEY, voices.clone())
            .await;
        tracing::info!(voice_count = voices.len(), "Voice catalog cached");

        Ok(voices)
    }
}
