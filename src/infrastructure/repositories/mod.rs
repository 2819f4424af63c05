pub mod elevenlabs_tts_repository;
pub mod tts_repository;

pub use elevenlabs_tts_repository::ElevenLabsTtsRepository;
pub use tts_repository::{ProviderError, TtsRepository};
