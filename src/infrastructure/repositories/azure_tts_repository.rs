use super::tts_repository::{DocumentTtsRepository, PrimarySynthesisError};
use async_trait::async_trait;
use reqwest::header;

/// MP3 output matching the Content-Type the service advertises.
const OUTPUT_FORMAT: &str = "audio-24khz-48kbitrate-mono-mp3";

/// Azure neural speech implementation of the primary provider.
///
/// Posts the composed SSML document to the region's REST synthesis
/// endpoint. A transport-level failure is reported as `Transport` so the
/// orchestrator can fall back; a non-success HTTP status is the service's
/// own verdict and is reported as `Rejected`.
pub struct AzureTtsRepository {
    client: reqwest::Client,
    subscription_key: String,
    endpoint: String,
}

impl AzureTtsRepository {
    pub fn new(subscription_key: String, region: String) -> Self {
        let endpoint = format!("https://{region}.tts.speech.microsoft.com/cognitiveservices/v1");
        Self {
            client: reqwest::Client::new(),
            subscription_key,
            endpoint,
        }
    }
}

#[async_trait]
impl DocumentTtsRepository for AzureTtsRepository {
    async fn synthesize_document(&self, ssml: &str) -> Result<Vec<u8>, PrimarySynthesisError> {
        tracing::info!(
            document_length = ssml.len(),
            output_format = OUTPUT_FORMAT,
            "Calling Azure speech synthesis"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Ocp-Apim-Subscription-Key", &self.subscription_key)
            .header(header::CONTENT_TYPE, "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", OUTPUT_FORMAT)
            .header(header::USER_AGENT, "neural-tts-service")
            .body(ssml.to_string())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Azure synthesis request failed in transit");
                PrimarySynthesisError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status.as_u16(),
                body = %body,
                "Azure speech synthesis rejected the request"
            );
            return Err(PrimarySynthesisError::Rejected(format!(
                "status {}: {}",
                status.as_u16(),
                body
            )));
        }

        let audio = response.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read Azure audio response body");
            PrimarySynthesisError::Transport(e.to_string())
        })?;

        tracing::debug!(audio_size = audio.len(), "Azure audio received");

        Ok(audio.to_vec())
    }
}
