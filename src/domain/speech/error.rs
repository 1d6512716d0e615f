use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum SpeechServiceError {
    #[error("text is required")]
    EmptyText,
    /// The primary provider answered and definitively refused the request.
    /// Not retried against the fallback provider.
    #[error("speech synthesis rejected: {0}")]
    ProviderRejected(String),
    #[error("TTS failed: {0}")]
    SynthesisFailed(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<SpeechServiceError> for AppError {
    fn from(err: SpeechServiceError) -> Self {
        match err {
            SpeechServiceError::EmptyText => AppError::BadRequest("text is required".to_string()),
            SpeechServiceError::ProviderRejected(msg) => AppError::ExternalService(msg),
            SpeechServiceError::SynthesisFailed(msg) => {
                AppError::ExternalService(format!("TTS failed: {msg}"))
            }
            SpeechServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
