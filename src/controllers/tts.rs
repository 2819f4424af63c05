use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    domain::tts::{ConvertRequest, ConvertResponse, TtsServiceApi, Voice},
    error::AppResult,
};

pub struct TtsController {
    tts_service: Arc<dyn TtsServiceApi>,
}

impl TtsController {
    pub fn new(tts_service: Arc<dyn TtsServiceApi>) -> Self {
        Self { tts_service }
    }

    /// POST /api/tts/convert - Convert text to speech, audio returned as base64
    pub async fn convert(
        State(controller): State<Arc<TtsController>>,
        Json(request): Json<ConvertRequest>,
    ) -> AppResult<Json<ConvertResponse>> {
        let result = controller
            .tts_service
            .synthesize(request.text, request.voice_id)
            .await?;

        tracing::debug!(
            voice_id = %result.voice_id,
            audio_size = result.audio_data.len(),
            truncated = result.truncated,
            "Returning synthesized audio"
        );

        Ok(Json(ConvertResponse::from(result)))
    }

    /// GET /api/tts/voices - List available voices
    pub async fn voices(
        State(controller): State<Arc<TtsController>>,
    ) -> AppResult<Json<Vec<Voice>>> {
        let voices = controller.tts_service.list_voices().await?;
        Ok(Json(voices))
    }
}
