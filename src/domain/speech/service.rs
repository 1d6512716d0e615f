use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use super::dto::{SpeakRequest, TextSegment};
use super::error::SpeechServiceError;
use super::language::{detect_language, LanguageTag};
use super::voice::{VoiceOverrides, VoiceResolver};
use super::{prosody, ssml};
use crate::infrastructure::repositories::{
    DocumentTtsRepository, PrimarySynthesisError, StreamingTtsRepository,
};

pub const AUDIO_MIME_TYPE: &str = "audio/mpeg";

/// Final synthesis output handed back to the controller.
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    pub audio_data: Vec<u8>,
    pub mime_type: &'static str,
    /// Voice id actually used, exposed to the caller for diagnostics.
    pub voice_used: String,
}

/// Orchestrates the detect → plan → resolve → compose → synthesize
/// pipeline across the primary and fallback providers.
pub struct SpeechService {
    primary: Option<Arc<dyn DocumentTtsRepository>>,
    fallback: Arc<dyn StreamingTtsRepository>,
    resolver: VoiceResolver,
}

#[async_trait]
pub trait SpeechServiceApi: Send + Sync {
    /// Synthesize a request to audio.
    ///
    /// The primary provider receives a full SSML document with per-sentence
    /// languages, voices, and prosody. When it is unconfigured or
    /// unreachable, the fallback provider speaks the whole utterance with
    /// one voice resolved from the entire text. A definitive rejection from
    /// the primary is surfaced directly and never retried.
    async fn synthesize(&self, request: SpeakRequest) -> Result<SynthesisResult, SpeechServiceError>;
}

impl SpeechService {
    pub fn new(
        primary: Option<Arc<dyn DocumentTtsRepository>>,
        fallback: Arc<dyn StreamingTtsRepository>,
        resolver: VoiceResolver,
    ) -> Self {
        Self {
            primary,
            fallback,
            resolver,
        }
    }

    /// Split the text into sentences and decide language, voice, and
    /// prosody for each one, in original order.
    fn plan_segments(&self, text: &str, request: &SpeakRequest, overrides: &VoiceOverrides) -> Vec<TextSegment> {
        let mut rng = rand::thread_rng();

        ssml::split_sentences(text)
            .into_iter()
            .map(|sentence| {
                let language = detect_language(&sentence);
                let (voice_id, locale) = self.resolver.resolve_for_sentence(language, overrides);
                let plan = prosody::plan(
                    &mut rng,
                    request.pace,
                    request.semitones,
                    &request.style,
                    request.style_degree,
                );

                TextSegment {
                    text: sentence,
                    language,
                    voice_id,
                    locale,
                    rate_percent: plan.rate_percent,
                    pitch_semitones: plan.pitch_semitones,
                    style: request.style.clone(),
                    style_degree: plan.style_degree,
                }
            })
            .collect()
    }

    async fn synthesize_fallback(
        &self,
        text: &str,
        overrides: &VoiceOverrides,
    ) -> Result<SynthesisResult, SpeechServiceError> {
        // The catalog is fetched fresh per request and verification is
        // best-effort: a failed fetch keeps the voice resolved so far.
        let catalog = match self.fallback.list_voices().await {
            Ok(voices) => Some(voices),
            Err(e) => {
                tracing::warn!(error = %e, "Voice catalog fetch failed, skipping verification");
                None
            }
        };

        let voice = self
            .resolver
            .resolve_fallback(text, overrides, catalog.as_deref());

        tracing::info!(voice = %voice, "Synthesizing with fallback provider");

        let audio_data = self
            .fallback
            .synthesize(text, &voice)
            .await
            .map_err(SpeechServiceError::SynthesisFailed)?;

        Ok(SynthesisResult {
            audio_data,
            mime_type: AUDIO_MIME_TYPE,
            voice_used: voice,
        })
    }
}

#[async_trait]
impl SpeechServiceApi for SpeechService {
    async fn synthesize(&self, request: SpeakRequest) -> Result<SynthesisResult, SpeechServiceError> {
        let text = request.text.trim().to_string();
        if text.is_empty() {
            return Err(SpeechServiceError::EmptyText);
        }

        tracing::info!(
            text_length = text.len(),
            style = %request.style,
            primary_configured = self.primary.is_some(),
            "Speech synthesis request"
        );

        let start_time = Instant::now();
        let overrides = request.voice_overrides();

        if let Some(primary) = &self.primary {
            let segments = self.plan_segments(&text, &request, &overrides);
            let document = ssml::compose(&text, &segments, &request.role);

            tracing::debug!(
                segment_count = segments.len(),
                document_length = document.len(),
                "Composed synthesis document"
            );

            match primary.synthesize_document(&document).await {
                Ok(audio_data) => {
                    // The document can mix voices per sentence; the English
                    // voice is the one reported back for diagnostics.
                    let (voice_used, _) = self
                        .resolver
                        .resolve_for_sentence(LanguageTag::English, &overrides);

                    tracing::info!(
                        provider = "primary",
                        latency_ms = start_time.elapsed().as_millis(),
                        audio_size_bytes = audio_data.len(),
                        "Speech synthesis completed"
                    );

                    return Ok(SynthesisResult {
                        audio_data,
                        mime_type: AUDIO_MIME_TYPE,
                        voice_used,
                    });
                }
                Err(PrimarySynthesisError::Rejected(reason)) => {
                    // The provider answered; its verdict is authoritative
                    // and the fallback is not consulted.
                    return Err(SpeechServiceError::ProviderRejected(reason));
                }
                Err(PrimarySynthesisError::Transport(reason)) => {
                    tracing::warn!(
                        reason = %reason,
                        "Primary provider unreachable, falling back"
                    );
                }
            }
        }

        let result = self.synthesize_fallback(&text, &overrides).await?;

        tracing::info!(
            provider = "fallback",
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = result.audio_data.len(),
            "Speech synthesis completed"
        );

        Ok(result)
    }
}
