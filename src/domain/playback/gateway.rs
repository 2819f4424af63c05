use async_trait::async_trait;

use super::error::PlaybackError;
use crate::domain::tts::{ConvertResponse, Voice};

/// The controller's view of the synthesis gateway (`tts.convert` / `tts.voices`).
#[async_trait]
pub trait SynthesisGateway: Send + Sync {
    /// Synthesize `text`; `None` lets the gateway pick its default voice.
    async fn convert(
        &self,
        text: &str,
        voice_id: Option<&str>,
    ) -> Result<ConvertResponse, PlaybackError>;

    /// Voice catalog, in provider order.
    async fn voices(&self) -> Result<Vec<Voice>, PlaybackError>;
}
