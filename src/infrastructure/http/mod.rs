pub mod request_id;

use axum::{middleware, routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::controllers::{health, SpeechController};
use crate::infrastructure::config::Config;

pub use request_id::{request_id_middleware, RequestId};

/// Build the application router with all routes configured.
///
/// Split out from server startup so tests can drive the router directly.
pub fn build_router(speech_controller: Arc<SpeechController>) -> Router {
    let speech_routes = Router::new()
        .route("/speak", post(SpeechController::speak))
        .route("/voices", get(SpeechController::voices))
        .with_state(speech_controller);

    Router::new()
        .route("/health", get(health::health))
        .merge(speech_routes)
        .layer(middleware::from_fn(request_id_middleware))
        // Open to all origins
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn start_http_server(
    config: Arc<Config>,
    speech_controller: Arc<SpeechController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(speech_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
