pub mod azure_tts_repository;
pub mod edge_tts_repository;
pub mod tts_repository;

pub use azure_tts_repository::AzureTtsRepository;
pub use edge_tts_repository::EdgeTtsRepository;
pub use tts_repository::{DocumentTtsRepository, PrimarySynthesisError, StreamingTtsRepository};
