use crate::domain::speech::Voice;
use async_trait::async_trait;

/// Error from the document-based primary provider.
///
/// The two variants drive the fallback policy: a transport fault means the
/// provider never gave an answer, so trying the secondary provider is safe;
/// a rejection is the provider's own verdict on the request and is
/// surfaced to the caller without a fallback attempt.
#[derive(Debug, thiserror::Error)]
pub enum PrimarySynthesisError {
    #[error("primary provider unreachable: {0}")]
    Transport(String),
    #[error("primary provider rejected synthesis: {0}")]
    Rejected(String),
}

/// Document-based (SSML) synthesis provider.
///
/// Implementations receive the fully composed markup document and return
/// the complete audio payload. Voice, language, and prosody decisions are
/// carried inside the document itself.
#[async_trait]
pub trait DocumentTtsRepository: Send + Sync {
    async fn synthesize_document(&self, ssml: &str) -> Result<Vec<u8>, PrimarySynthesisError>;
}

/// Plain-text streaming synthesis provider, used as the fallback path.
///
/// Implementations are responsible for:
/// - Synthesizing plain text with a single voice for the whole utterance
/// - Concatenating streamed audio chunks into one buffer
/// - Enumerating the currently available voices on demand
#[async_trait]
pub trait StreamingTtsRepository: Send + Sync {
    /// Synthesize text with one voice, returning merged MP3 audio.
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, String>;

    /// Fetch the provider's current voice catalog.
    async fn list_voices(&self) -> Result<Vec<Voice>, String>;
}
