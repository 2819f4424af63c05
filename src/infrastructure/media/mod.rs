//! Channel-backed capabilities for a front-end that owns the real audio
//! element and speech engine (browser over a socket, desktop shell).
//!
//! The controller side pushes commands into an unbounded channel; the
//! front-end drains the receiver, drives its devices and reports media
//! events back through the controller's `handle_*` methods.

use tokio::sync::mpsc;

use crate::domain::playback::{AudioClip, AudioOutput, PlaybackError, SpeechRecognizer};

/// Commands for the front-end audio element.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaCommand {
    Load(AudioClip),
    Play,
    Pause,
    SeekToStart,
    SetRate(f32),
    Unload,
}

/// Commands for the front-end speech engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognizerCommand {
    Start,
    Stop,
}

pub struct ChannelAudioOutput {
    tx: mpsc::UnboundedSender<MediaCommand>,
}

impl ChannelAudioOutput {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<MediaCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, command: MediaCommand) -> Result<(), PlaybackError> {
        self.tx
            .send(command)
            .map_err(|_| PlaybackError::Output("audio front-end disconnected".to_string()))
    }

    /// Fire-and-forget variant for commands that cannot fail visibly
    fn send_quiet(&self, command: MediaCommand) {
        if let Err(e) = self.send(command) {
            tracing::debug!(error = %e, "Media command dropped");
        }
    }
}

impl AudioOutput for ChannelAudioOutput {
    fn load(&self, clip: &AudioClip) -> Result<(), PlaybackError> {
        self.send(MediaCommand::Load(clip.clone()))
    }

    fn play(&self) -> Result<(), PlaybackError> {
        self.send(MediaCommand::Play)
    }

    fn pause(&self) {
        self.send_quiet(MediaCommand::Pause);
    }

    fn seek_to_start(&self) {
        self.send_quiet(MediaCommand::SeekToStart);
    }

    fn set_rate(&self, rate: f32) {
        self.send_quiet(MediaCommand::SetRate(rate));
    }

    fn unload(&self) {
        self.send_quiet(MediaCommand::Unload);
    }
}

pub struct ChannelSpeechRecognizer {
    tx: mpsc::UnboundedSender<RecognizerCommand>,
}

impl ChannelSpeechRecognizer {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<RecognizerCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl SpeechRecognizer for ChannelSpeechRecognizer {
    fn start(&self) -> Result<(), PlaybackError> {
        self.tx
            .send(RecognizerCommand::Start)
            .map_err(|_| PlaybackError::Recognition("speech front-end disconnected".to_string()))
    }

    fn stop(&self) {
        let _ = self.tx.send(RecognizerCommand::Stop);
    }
}
