use serde::{Deserialize, Serialize};

/// Lifecycle of one playback session.
///
/// ```text
///   Idle → Uploading → Ready → Processing → Playing ⇄ Paused
///              │                   │            │
///              └──────→ Error ←────┘            └──→ Ready (stop / end of media)
/// ```
///
/// Clearing the document returns to `Idle` from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// No document loaded.
    Idle,

    /// A file was selected and is being read.
    Uploading,

    /// Waiting for the gateway to return synthesized audio.
    Processing,

    /// Document loaded; audio may or may not be cached.
    Ready,

    /// Audio output is running.
    Playing,

    /// Audio output is paused mid-clip.
    Paused,

    /// The last read or synthesis failed.
    Error,
}

impl PlaybackState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackState::Idle => "idle",
            PlaybackState::Uploading => "uploading",
            PlaybackState::Processing => "processing",
            PlaybackState::Ready => "ready",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
            PlaybackState::Error => "error",
        }
    }

    /// Whether an audio clip is attached to the output
    pub fn is_engaged(&self) -> bool {
        matches!(self, PlaybackState::Playing | PlaybackState::Paused)
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
