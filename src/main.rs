use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use murph_voice::domain::tts::{TtsService, TtsServiceApi};
use murph_voice::infrastructure::config::{Config, LogFormat};
use murph_voice::infrastructure::http::start_http_server;
use murph_voice::infrastructure::repositories::ElevenLabsTtsRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Murph voice gateway on {}:{}",
        config.host,
        config.port
    );

    // The key itself is never logged
    tracing::info!(
        base_url = %config.elevenlabs_base_url,
        model = %config.elevenlabs_model_id,
        default_voice = %config.default_voice_id,
        voices_cache_ttl_secs = config.voices_cache_ttl_secs,
        "ElevenLabs configuration loaded"
    );

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories
    let tts_repo = Arc::new(ElevenLabsTtsRepository::new(
        config.elevenlabs_base_url.clone(),
        config.elevenlabs_api_key.clone(),
        config.elevenlabs_model_id.clone(),
        config.provider_timeout(),
    )?);

    // 2. Instantiate services
    let tts_service: Arc<dyn TtsServiceApi> = Arc::new(TtsService::new(
        tts_repo,
        config.default_voice_id.clone(),
        config.voices_cache_ttl(),
    ));

    // Start HTTP server with all routes
    start_http_server(Arc::new(config), tts_service).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "murph_voice=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
