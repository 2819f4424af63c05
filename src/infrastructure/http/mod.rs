pub mod request_id;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{health, tts::TtsController};
use crate::domain::tts::TtsServiceApi;
use crate::infrastructure::config::Config;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

/// Build the application router with all routes and layers
pub fn build_router(config: &Config, tts_service: Arc<dyn TtsServiceApi>) -> Router {
    let tts_controller = Arc::new(TtsController::new(tts_service.clone()));

    // TTS routes (public, the provider key never leaves this process)
    let tts_routes = Router::new()
        .route("/api/tts/convert", post(TtsController::convert))
        .route("/api/tts/voices", get(TtsController::voices))
        .with_state(tts_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(tts_service)
        .merge(tts_routes)
        .layer(cors_layer(config))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::HeaderName::from_static(X_REQUEST_ID)]);

    match config.cors_allowed_origin.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(origin),
        Some(Err(e)) => {
            tracing::warn!(error = %e, "Invalid CORS_ALLOWED_ORIGIN, cross-origin requests disabled");
            base
        }
        None if config.is_development() => CorsLayer::permissive(),
        None => base,
    }
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    tts_service: Arc<dyn TtsServiceApi>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(&config, tts_service);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
