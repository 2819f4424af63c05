use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::tts::TtsServiceApi;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Ready once the voice catalog can be served (cached or fetched)
pub async fn health_ready(State(tts_service): State<Arc<dyn TtsServiceApi>>) -> impl IntoResponse {
    match tts_service.list_voices().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "tts": "available"
            })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "tts": "unavailable"
                })),
            )
        }
    }
}
