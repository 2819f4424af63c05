use murph_voice::domain::tts::{TtsService, TtsServiceApi};
use murph_voice::infrastructure::config::{Config, Environment, LogFormat};
use murph_voice::infrastructure::http::build_router;
use murph_voice::infrastructure::repositories::ElevenLabsTtsRepository;
use once_cell::sync::Lazy;
use std::sync::Arc;
use std::time::Duration;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;
use wiremock::MockServer;

pub mod api_client;
pub mod provider_mocks;

use api_client::TestClient;

pub const TEST_API_KEY: &str = "test-elevenlabs-key";
pub const TEST_DEFAULT_VOICE: &str = "21m00Tcm4TlvDq8ikWAM";

// Logs from the server under test, shown only for failing tests
static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "murph_voice=debug".into()),
        )
        .with_test_writer()
        .try_init();
});

pub struct TestContext {
    pub client: TestClient,
    pub base_url: String,
    pub provider: MockServer,
    #[allow(dead_code)]
    pub config: Config,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            Lazy::force(&TRACING);

            // Fake ElevenLabs
            let provider = MockServer::start().await;

            let config = Config {
                host: "127.0.0.1".to_string(),
                port: 0, // Will be assigned by the OS
                environment: Environment::Development,
                log_format: LogFormat::Pretty,
                elevenlabs_api_key: TEST_API_KEY.to_string(),
                elevenlabs_base_url: provider.uri(),
                elevenlabs_model_id: "eleven_monolingual_v1".to_string(),
                default_voice_id: TEST_DEFAULT_VOICE.to_string(),
                provider_timeout_secs: 5,
                voices_cache_ttl_secs: 3600,
                cors_allowed_origin: None,
            };

            let tts_repo = Arc::new(
                ElevenLabsTtsRepository::new(
                    config.elevenlabs_base_url.clone(),
                    config.elevenlabs_api_key.clone(),
                    config.elevenlabs_model_id.clone(),
                    config.provider_timeout(),
                )
                .expect("Failed to build provider client"),
            );
            let tts_service: Arc<dyn TtsServiceApi> = Arc::new(TtsService::new(
                tts_repo,
                config.default_voice_id.clone(),
                config.voices_cache_ttl(),
            ));

            let app = build_router(&config, tts_service);

            // Start server
            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind listener");
            let addr = listener.local_addr().expect("Failed to get local addr");
            let base_url = format!("http://{}", addr);

            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            // Wait for server to be ready
            tokio::time::sleep(Duration::from_millis(50)).await;

            Self {
                client: TestClient::new(&base_url),
                base_url,
                provider,
                config,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // Mock expectations are verified when the MockServer drops
        }
    }
}
