use crate::domain::tts::Voice;
use async_trait::async_trait;

/// Failure talking to the TTS provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider answered with a non-success status.
    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never produced a usable response (connect, timeout, decode).
    #[error("provider request failed: {0}")]
    Transport(String),

    /// The provider URL could not be built from the configured base URL.
    #[error("invalid provider url: {0}")]
    InvalidUrl(String),
}

impl ProviderError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Status { status, .. } => Some(*status),
            ProviderError::Transport(_) | ProviderError::InvalidUrl(_) => None,
        }
    }
}

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider (ElevenLabs today).
///
/// Implementations receive text that has already been validated and
/// truncated to the provider limit; they must not return partial audio.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize text with the given provider voice.
    ///
    /// Returns the encoded audio (MP3) exactly as the provider sent it.
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, ProviderError>;

    /// List the voices available to this account, in provider order.
    async fn list_voices(&self) -> Result<Vec<Voice>, ProviderError>;
}
