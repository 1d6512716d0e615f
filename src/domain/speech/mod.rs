pub mod dto;
pub mod error;
pub mod language;
pub mod prosody;
pub mod ssml;
pub mod voice;
pub mod service;

pub use dto::{SpeakRequest, TextSegment};
pub use error::SpeechServiceError;
pub use language::{detect_language, LanguageTag};
pub use service::{SpeechService, SpeechServiceApi, SynthesisResult};
pub use voice::{Voice, VoiceConfig, VoiceOverrides, VoiceResolver};
