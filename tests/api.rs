use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use tower::ServiceExt;

use neural_tts_service::controllers::SpeechController;
use neural_tts_service::domain::speech::{
    SpeechService, Voice, VoiceConfig, VoiceResolver,
};
use neural_tts_service::infrastructure::http::build_router;
use neural_tts_service::infrastructure::repositories::{
    DocumentTtsRepository, PrimarySynthesisError, StreamingTtsRepository,
};

struct StubPrimary {
    response: Result<Vec<u8>, PrimarySynthesisError>,
}

#[async_trait]
impl DocumentTtsRepository for StubPrimary {
    async fn synthesize_document(&self, _ssml: &str) -> Result<Vec<u8>, PrimarySynthesisError> {
        match &self.response {
            Ok(audio) => Ok(audio.clone()),
            Err(PrimarySynthesisError::Transport(r)) => {
                Err(PrimarySynthesisError::Transport(r.clone()))
            }
            Err(PrimarySynthesisError::Rejected(r)) => {
                Err(PrimarySynthesisError::Rejected(r.clone()))
            }
        }
    }
}

struct StubFallback {
    audio: Vec<u8>,
    voices: Vec<Voice>,
    synth_calls: AtomicUsize,
}

impl StubFallback {
    fn new(audio: &[u8], voices: Vec<Voice>) -> Self {
        Self {
            audio: audio.to_vec(),
            voices,
            synth_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl StreamingTtsRepository for StubFallback {
    async fn synthesize(&self, _text: &str, _voice: &str) -> Result<Vec<u8>, String> {
        self.synth_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.audio.clone())
    }

    async fn list_voices(&self) -> Result<Vec<Voice>, String> {
        Ok(self.voices.clone())
    }
}

fn catalog_voice(short_name: &str, locale: &str) -> Voice {
    Voice {
        name: format!("Microsoft Server Speech Text to Speech Voice ({locale}, {short_name})"),
        short_name: short_name.to_string(),
        gender: "Female".to_string(),
        locale: locale.to_string(),
        friendly_name: format!("{short_name} - {locale}"),
    }
}

fn default_catalog() -> Vec<Voice> {
    vec![
        catalog_voice("en-IN-NeerjaNeural", "en-IN"),
        catalog_voice("hi-IN-SwaraNeural", "hi-IN"),
    ]
}

fn router_with(
    primary: Option<Arc<dyn DocumentTtsRepository>>,
    fallback: Arc<StubFallback>,
) -> axum::Router {
    let speech_service = Arc::new(SpeechService::new(
        primary,
        fallback.clone() as Arc<dyn StreamingTtsRepository>,
        VoiceResolver::new(VoiceConfig::default()),
    ));
    let controller = Arc::new(SpeechController::new(
        speech_service,
        fallback as Arc<dyn StreamingTtsRepository>,
    ));
    build_router(controller)
}

fn speak_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/speak")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn it_should_reject_empty_text_with_exact_error_body() {
    let fallback = Arc::new(StubFallback::new(b"audio", default_catalog()));
    let app = router_with(None, fallback.clone());

    let response = app.oneshot(speak_request(json!({"text": ""}))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], br#"{"error":"text is required"}"#);
    assert_eq!(fallback.synth_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn it_should_reject_missing_text_field() {
    let fallback = Arc::new(StubFallback::new(b"audio", default_catalog()));
    let app = router_with(None, fallback);

    let response = app.oneshot(speak_request(json!({}))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], br#"{"error":"text is required"}"#);
}

#[tokio::test]
async fn it_should_synthesize_via_fallback_when_primary_is_unconfigured() {
    let fallback = Arc::new(StubFallback::new(b"fallback-audio", default_catalog()));
    let app = router_with(None, fallback.clone());

    let response = app
        .oneshot(speak_request(json!({"text": "Hello, kaise ho?"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "audio/mpeg"
    );
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
    // Whole-text detection classifies the request as Hindi via "kaise",
    // so the Hindi default voice is used, not the English one.
    assert_eq!(
        response.headers().get("X-Voice").unwrap(),
        "hi-IN-SwaraNeural"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"fallback-audio");
    assert_eq!(fallback.synth_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn it_should_report_the_english_voice_on_the_primary_path() {
    let primary = Arc::new(StubPrimary {
        response: Ok(b"primary-audio".to_vec()),
    });
    let fallback = Arc::new(StubFallback::new(b"fallback-audio", default_catalog()));
    let app = router_with(Some(primary), fallback.clone());

    let response = app
        .oneshot(speak_request(json!({"text": "Hello there. kaise ho?"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("X-Voice").unwrap(),
        "en-IN-NeerjaNeural"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"primary-audio");
    assert_eq!(fallback.synth_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn it_should_fall_back_when_the_primary_is_unreachable() {
    let primary = Arc::new(StubPrimary {
        response: Err(PrimarySynthesisError::Transport("timeout".to_string())),
    });
    let fallback = Arc::new(StubFallback::new(b"fallback-audio", default_catalog()));
    let app = router_with(Some(primary), fallback.clone());

    let response = app
        .oneshot(speak_request(json!({"text": "Hello there."})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"fallback-audio");
    assert_eq!(fallback.synth_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn it_should_surface_primary_rejection_as_500_without_fallback() {
    let primary = Arc::new(StubPrimary {
        response: Err(PrimarySynthesisError::Rejected("quota exceeded".to_string())),
    });
    let fallback = Arc::new(StubFallback::new(b"fallback-audio", default_catalog()));
    let app = router_with(Some(primary), fallback.clone());

    let response = app
        .oneshot(speak_request(json!({"text": "Hello there."})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed["error"], "quota exceeded");
    assert_eq!(fallback.synth_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn it_should_enumerate_the_voice_catalog() {
    let fallback = Arc::new(StubFallback::new(b"audio", default_catalog()));
    let app = router_with(None, fallback);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/voices")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
    assert_eq!(parsed[0]["ShortName"], "en-IN-NeerjaNeural");
    assert_eq!(parsed[0]["Locale"], "en-IN");
}

#[tokio::test]
async fn it_should_attach_a_request_id_to_every_response() {
    let fallback = Arc::new(StubFallback::new(b"audio", default_catalog()));
    let app = router_with(None, fallback);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("x-request-id").is_some());
}
