pub mod dto;
pub mod error;
pub mod service;
pub mod text;

pub use dto::{ConvertRequest, ConvertResponse, Voice};
pub use error::TtsServiceError;
pub use service::{TtsService, TtsServiceApi, TtsSynthesisResult, AUDIO_CONTENT_TYPE};
pub use text::{truncate_for_provider, validate_text, TextError, MAX_TEXT_CHARS, PROVIDER_MAX_CHARS};
