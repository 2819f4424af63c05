use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use super::service::TtsSynthesisResult;

/// Request for POST /api/tts/convert
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
}

/// Response for POST /api/tts/convert
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    /// Base64 (standard alphabet, padded) MP3 bytes
    pub audio: String,
    pub content_type: String,
}

impl From<TtsSynthesisResult> for ConvertResponse {
    fn from(result: TtsSynthesisResult) -> Self {
        Self {
            audio: STANDARD.encode(&result.audio_data),
            content_type: result.content_type.to_string(),
        }
    }
}

/// One entry of GET /api/tts/voices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub id: String,
    pub name: String,
    pub category: String,
}
