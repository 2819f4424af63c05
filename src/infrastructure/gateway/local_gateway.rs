use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::playback::{PlaybackError, SynthesisGateway};
use crate::domain::tts::{ConvertResponse, TtsServiceApi, TtsServiceError, Voice};

impl From<TtsServiceError> for PlaybackError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::Invalid(msg) | TtsServiceError::TooLarge(msg) => {
                PlaybackError::Validation(msg)
            }
            TtsServiceError::Provider { status, message } => {
                PlaybackError::Provider { status, message }
            }
            TtsServiceError::Other(e) => PlaybackError::provider(e),
        }
    }
}

/// Calls the gateway service in-process, for embedding the controller in
/// the same binary as the service.
pub struct LocalSynthesisGateway {
    tts_service: Arc<dyn TtsServiceApi>,
}

impl LocalSynthesisGateway {
    pub fn new(tts_service: Arc<dyn TtsServiceApi>) -> Self {
        Self { tts_service }
    }
}

#[async_trait]
impl SynthesisGateway for LocalSynthesisGateway {
    async fn convert(
        &self,
        text: &str,
        voice_id: Option<&str>,
    ) -> Result<ConvertResponse, PlaybackError> {
        let result = self
            .tts_service
            .synthesize(text.to_string(), voice_id.map(str::to_string))
            .await?;
        Ok(ConvertResponse::from(result))
    }

    async fn voices(&self) -> Result<Vec<Voice>, PlaybackError> {
        Ok(self.tts_service.list_voices().await?)
    }
}
