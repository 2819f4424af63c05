//! `AudioOutput` and `SpeechRecognizer` capability traits.
//!
//! The controller never touches devices directly. A front-end (browser,
//! desktop shell) owns the real audio element and speech engine and
//! implements these traits, reporting media events back through
//! [`PlaybackController`](super::PlaybackController) handler methods:
//!
//! | Event | Handler |
//! |---|---|
//! | time update | `handle_time_update` |
//! | end of media | `handle_ended` |
//! | transcript | `handle_transcript` |
//! | recognizer stopped | `handle_recognition_end` |
//! | recognizer failed | `handle_recognition_error` |
//!
//! Both traits take `&self` so they stay object-safe; implementations use
//! interior mutability or channels for state.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::Arc;

use super::error::PlaybackError;
use crate::domain::tts::ConvertResponse;

/// Decoded audio ready to hand to an output.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub bytes: Arc<[u8]>,
    pub content_type: String,
}

impl AudioClip {
    /// Decode a gateway payload. Empty or malformed audio is rejected.
    pub fn from_response(response: ConvertResponse) -> Result<Self, PlaybackError> {
        let bytes = STANDARD
            .decode(response.audio.as_bytes())
            .map_err(|e| PlaybackError::provider(format!("malformed audio payload: {}", e)))?;

        if bytes.is_empty() {
            return Err(PlaybackError::provider("empty audio payload"));
        }

        Ok(Self {
            bytes: bytes.into(),
            content_type: response.content_type,
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// ── AudioOutput ────────────────────────────────────────────────────

/// Abstraction over a playable audio element.
pub trait AudioOutput: Send + Sync {
    /// Attach a clip as the current source, replacing any previous one.
    fn load(&self, clip: &AudioClip) -> Result<(), PlaybackError>;

    /// Start or resume playback of the attached clip.
    fn play(&self) -> Result<(), PlaybackError>;

    fn pause(&self);

    /// Rewind to the beginning without starting playback.
    fn seek_to_start(&self);

    /// Playback rate multiplier; 1.0 is normal speed.
    fn set_rate(&self, rate: f32);

    /// Detach the current source and release it.
    fn unload(&self);
}

// ── SpeechRecognizer ───────────────────────────────────────────────

/// Abstraction over a continuous speech-recognition engine.
pub trait SpeechRecognizer: Send + Sync {
    /// Begin listening. Fails with `PlaybackError::Recognition` when the
    /// engine is missing or refuses to start (e.g. no microphone permission).
    fn start(&self) -> Result<(), PlaybackError>;

    fn stop(&self);
}

// ── No-op implementations ──────────────────────────────────────────

/// Output that accepts every call and produces no sound. Used headless.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAudioOutput;

impl AudioOutput for NoopAudioOutput {
    fn load(&self, clip: &AudioClip) -> Result<(), PlaybackError> {
        tracing::trace!(audio_size = clip.len(), "noop output: load");
        Ok(())
    }

    fn play(&self) -> Result<(), PlaybackError> {
        Ok(())
    }

    fn pause(&self) {}

    fn seek_to_start(&self) {}

    fn set_rate(&self, _rate: f32) {}

    fn unload(&self) {}
}

/// Recognizer that starts successfully and never hears anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSpeechRecognizer;

impl SpeechRecognizer for NoopSpeechRecognizer {
    fn start(&self) -> Result<(), PlaybackError> {
        Ok(())
    }

    fn stop(&self) {}
}
