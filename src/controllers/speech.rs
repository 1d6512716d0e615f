use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::speech::{SpeakRequest, SpeechService, SpeechServiceApi, Voice},
    error::{AppError, AppResult},
    infrastructure::repositories::StreamingTtsRepository,
};

pub struct SpeechController {
    speech_service: Arc<SpeechService>,
    voice_catalog: Arc<dyn StreamingTtsRepository>,
}

impl SpeechController {
    pub fn new(
        speech_service: Arc<SpeechService>,
        voice_catalog: Arc<dyn StreamingTtsRepository>,
    ) -> Self {
        Self {
            speech_service,
            voice_catalog,
        }
    }

    /// POST /speak - Convert text to speech
    pub async fn speak(
        State(controller): State<Arc<SpeechController>>,
        Json(request): Json<SpeakRequest>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        // Validate input before any provider is touched
        if request.text.trim().is_empty() {
            return Err(AppError::BadRequest("text is required".to_string()));
        }

        let result = controller
            .speech_service
            .synthesize(request)
            .await
            .map_err(AppError::from)?;

        // Build headers
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, result.mime_type.parse().unwrap());
        headers.insert(header::CACHE_CONTROL, "no-store".parse().unwrap());
        headers.insert(
            "X-Voice",
            result
                .voice_used
                .parse()
                .map_err(|_| AppError::Internal("invalid voice header".to_string()))?,
        );

        Ok((StatusCode::OK, headers, Body::from(result.audio_data)))
    }

    /// GET /voices - Enumerate the fallback provider's voice catalog
    pub async fn voices(
        State(controller): State<Arc<SpeechController>>,
    ) -> AppResult<Json<Vec<Voice>>> {
        let voices = controller
            .voice_catalog
            .list_voices()
            .await
            .map_err(AppError::ExternalService)?;

        Ok(Json(voices))
    }
}
