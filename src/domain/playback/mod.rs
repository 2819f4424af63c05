//! Client-side playback session: document state, synthesis lifecycle,
//! audio output control and voice-command dispatch.

pub mod capability;
pub mod command;
pub mod controller;
pub mod document;
pub mod error;
pub mod gateway;
pub mod state;

pub use capability::{AudioClip, AudioOutput, NoopAudioOutput, NoopSpeechRecognizer, SpeechRecognizer};
pub use command::{VoiceCommand, SPEED_STEP};
pub use controller::{
    CompletionOutcome, PlayOutcome, PlaybackController, PlaybackEvent, SynthesisCompletion,
    DEFAULT_SPEED, MAX_SPEED, MIN_SPEED,
};
pub use document::{Document, SelectedFile, ACCEPTED_EXTENSIONS};
pub use error::PlaybackError;
pub use gateway::SynthesisGateway;
pub use state::PlaybackState;
