use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use neural_tts_service::controllers::SpeechController;
use neural_tts_service::domain::speech::{SpeechService, VoiceConfig, VoiceResolver};
use neural_tts_service::infrastructure::config::{Config, LogFormat};
use neural_tts_service::infrastructure::http::start_http_server;
use neural_tts_service::infrastructure::repositories::{
    AzureTtsRepository, DocumentTtsRepository, EdgeTtsRepository, StreamingTtsRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Neural TTS Service on {}:{}",
        config.host,
        config.port
    );

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate provider repositories
    let edge_repo: Arc<EdgeTtsRepository> = Arc::new(EdgeTtsRepository::new());

    let azure_repo: Option<Arc<dyn DocumentTtsRepository>> =
        match config.primary_speech_credentials() {
            Some((key, region)) => {
                tracing::info!(region = region, "Azure speech credentials found, primary provider enabled");
                Some(Arc::new(AzureTtsRepository::new(
                    key.to_string(),
                    region.to_string(),
                )))
            }
            None => {
                tracing::warn!(
                    "SPEECH_KEY/SPEECH_REGION not configured, all synthesis will use the fallback provider"
                );
                None
            }
        };

    // 2. Instantiate the speech service (inject repositories)
    let speech_service = Arc::new(SpeechService::new(
        azure_repo,
        edge_repo.clone() as Arc<dyn StreamingTtsRepository>,
        VoiceResolver::new(VoiceConfig::default()),
    ));

    // 3. Instantiate the controller (inject service)
    let speech_controller = Arc::new(SpeechController::new(
        speech_service,
        edge_repo as Arc<dyn StreamingTtsRepository>,
    ));

    // Start HTTP server with all routes
    let config = Arc::new(config);
    start_http_server(config, speech_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "neural_tts_service=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "neural_tts_service=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
