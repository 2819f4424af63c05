//! Playback session controller.
//!
//! Owns the loaded document, the synthesis request lifecycle, the audio
//! output and voice-command dispatch for a single session. All methods take
//! `&mut self` and are driven from one task; synthesis runs on a spawned
//! tokio task and reports back as a [`SynthesisCompletion`] that the owner
//! feeds in through [`PlaybackController::next_completion`] or
//! [`PlaybackController::drain_completions`].
//!
//! Each dispatch is tagged with a generation number. A completion is applied
//! only if its tag matches the request still outstanding for the active
//! session; anything else (document cleared or replaced, voice changed) is
//! dropped silently.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc;

use super::capability::{AudioClip, AudioOutput, SpeechRecognizer};
use super::command::{VoiceCommand, SPEED_STEP};
use super::document::{Document, SelectedFile};
use super::error::PlaybackError;
use super::gateway::SynthesisGateway;
use super::state::PlaybackState;
use crate::domain::tts::{validate_text, Voice};
use crate::infrastructure::config::DEFAULT_VOICE_ID;

pub const MIN_SPEED: f32 = 0.5;
pub const MAX_SPEED: f32 = 2.0;
pub const DEFAULT_SPEED: f32 = 1.0;

// ── Events ─────────────────────────────────────────────────────────

/// Events emitted to the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    StateChanged(PlaybackState),
    DocumentLoaded { name: String, char_count: usize },
    /// Percentage in [0, 100].
    Progress(f64),
    SpeedChanged(f32),
    VoiceChanged(String),
    ListeningChanged(bool),
    CommandRecognized(VoiceCommand),
    /// Transient user-visible notification.
    Notification(PlaybackError),
}

/// Result of a synthesis task, correlated by generation.
#[derive(Debug)]
pub struct SynthesisCompletion {
    pub generation: u64,
    pub result: Result<AudioClip, PlaybackError>,
}

/// What `play()` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Synthesis dispatched with this generation tag.
    Synthesizing { generation: u64 },
    /// Paused audio resumed.
    Resumed,
    /// Cached audio restarted from the beginning without a network call.
    Replayed,
    AlreadyPlaying,
    /// A synthesis for this session is already outstanding.
    AlreadySynthesizing,
}

/// What happened to a completion.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionOutcome {
    /// Audio attached and playing.
    Applied,
    /// Current request failed; session moved to `Error`.
    Failed(PlaybackError),
    /// Not for the active request; ignored.
    Stale,
}

#[derive(Debug, Clone)]
struct PendingSynthesis {
    generation: u64,
    voice_id: String,
    /// Playback speed when the request was sent
    speed: f32,
}

#[derive(Debug, Clone)]
struct CachedAudio {
    voice_id: String,
    speed_at_generation: f32,
    clip: AudioClip,
}

// ── Controller ─────────────────────────────────────────────────────

pub struct PlaybackController {
    state: PlaybackState,
    document: Option<Document>,
    cached_audio: Option<CachedAudio>,
    pending: Option<PendingSynthesis>,
    next_generation: u64,
    progress: f64,
    playback_speed: f32,
    selected_voice_id: String,
    status_message: Option<String>,
    /// User intent; the engine may stop on its own while this stays true.
    listening: bool,

    gateway: Arc<dyn SynthesisGateway>,
    audio: Box<dyn AudioOutput>,
    recognizer: Box<dyn SpeechRecognizer>,

    event_tx: mpsc::UnboundedSender<PlaybackEvent>,
    completion_tx: mpsc::UnboundedSender<SynthesisCompletion>,
    completion_rx: mpsc::UnboundedReceiver<SynthesisCompletion>,
}

impl PlaybackController {
    /// Create a controller in `Idle`.
    ///
    /// Returns the controller and a receiver for [`PlaybackEvent`]s.
    pub fn new(
        gateway: Arc<dyn SynthesisGateway>,
        audio: Box<dyn AudioOutput>,
        recognizer: Box<dyn SpeechRecognizer>,
    ) -> (Self, mpsc::UnboundedReceiver<PlaybackEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();

        let controller = Self {
            state: PlaybackState::Idle,
            document: None,
            cached_audio: None,
            pending: None,
            next_generation: 1,
            progress: 0.0,
            playback_speed: DEFAULT_SPEED,
            selected_voice_id: DEFAULT_VOICE_ID.to_string(),
            status_message: None,
            listening: false,
            gateway,
            audio,
            recognizer,
            event_tx,
            completion_tx,
            completion_rx,
        };

        (controller, event_rx)
    }

    // ── Accessors ──────────────────────────────────────────────────

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn playback_speed(&self) -> f32 {
        self.playback_speed
    }

    pub fn selected_voice_id(&self) -> &str {
        &self.selected_voice_id
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn has_cached_audio(&self) -> bool {
        self.cached_audio.is_some()
    }

    /// Speed the cached clip was generated at, if any
    pub fn cached_audio_speed(&self) -> Option<f32> {
        self.cached_audio.as_ref().map(|c| c.speed_at_generation)
    }

    pub fn is_synthesizing(&self) -> bool {
        self.pending.is_some()
    }

    // ── Documents ──────────────────────────────────────────────────

    /// Load a file picked by the user, replacing any current session.
    pub fn load_document(&mut self, file: SelectedFile) -> Result<&Document, PlaybackError> {
        self.begin_upload();
        self.finish_upload(Document::from_file(file))
    }

    /// Read and load a file from disk, replacing any current session.
    pub async fn load_document_from_path(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<&Document, PlaybackError> {
        self.begin_upload();
        let decoded = SelectedFile::read(path).await.and_then(Document::from_file);
        self.finish_upload(decoded)
    }

    /// Drop the document and everything derived from it.
    pub fn clear_document(&mut self) {
        tracing::debug!(had_pending = self.pending.is_some(), "Clearing document");
        self.reset_session();
        self.status_message = None;
        self.set_state(PlaybackState::Idle);
    }

    fn begin_upload(&mut self) {
        self.reset_session();
        self.set_state(PlaybackState::Uploading);
    }

    fn finish_upload(
        &mut self,
        decoded: Result<Document, PlaybackError>,
    ) -> Result<&Document, PlaybackError> {
        match decoded {
            Ok(document) => {
                let char_count = document.char_count();
                tracing::info!(
                    name = %document.name,
                    mime_type = %document.mime_type,
                    char_count = char_count,
                    "Document loaded"
                );
                self.status_message = Some(format!("Loaded {}", document.name));
                self.emit(PlaybackEvent::DocumentLoaded {
                    name: document.name.clone(),
                    char_count,
                });
                self.set_state(PlaybackState::Ready);
                Ok(&*self.document.insert(document))
            }
            Err(e) => {
                self.fail(e.clone());
                Err(e)
            }
        }
    }

    /// Discard document, cached audio and any outstanding request.
    fn reset_session(&mut self) {
        self.pending = None;
        self.document = None;
        self.release_audio();
    }

    fn release_audio(&mut self) {
        if self.cached_audio.take().is_some() {
            self.audio.pause();
            self.audio.unload();
        }
        self.set_progress(0.0);
    }

    // ── Transport ──────────────────────────────────────────────────

    /// Start playback, synthesizing first when no usable audio is cached.
    ///
    /// Must be called inside a tokio runtime when synthesis is needed.
    pub fn play(&mut self) -> Result<PlayOutcome, PlaybackError> {
        match self.state {
            PlaybackState::Playing => return Ok(PlayOutcome::AlreadyPlaying),
            PlaybackState::Processing => {
                tracing::debug!("Play ignored, synthesis already in flight");
                return Ok(PlayOutcome::AlreadySynthesizing);
            }
            _ => {}
        }

        let Some(document) = self.document.as_ref() else {
            let err = PlaybackError::NoDocument;
            self.notify(&err);
            return Err(err);
        };

        if self.has_valid_cache() {
            let outcome = if self.state == PlaybackState::Paused {
                PlayOutcome::Resumed
            } else {
                self.audio.seek_to_start();
                PlayOutcome::Replayed
            };
            self.start_output()?;
            return Ok(outcome);
        }

        if let Err(e) = validate_text(&document.content) {
            let err = PlaybackError::Validation(e.to_string());
            self.fail(err.clone());
            return Err(err);
        }

        let generation = self.next_generation;
        self.next_generation += 1;
        let text = document.content.clone();
        let voice_id = self.selected_voice_id.clone();

        tracing::info!(
            generation = generation,
            voice_id = %voice_id,
            char_count = document.char_count(),
            "Dispatching synthesis"
        );

        self.pending = Some(PendingSynthesis {
            generation,
            voice_id: voice_id.clone(),
            speed: self.playback_speed,
        });
        self.status_message = Some("Generating audio...".to_string());
        self.set_state(PlaybackState::Processing);

        let gateway = self.gateway.clone();
        let completion_tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = gateway
                .convert(&text, Some(voice_id.as_str()))
                .await
                .and_then(AudioClip::from_response);
            // Receiver lives as long as the controller; a send error means it is gone
            let _ = completion_tx.send(SynthesisCompletion { generation, result });
        });

        Ok(PlayOutcome::Synthesizing { generation })
    }

    /// Pause; only meaningful while playing.
    pub fn pause(&mut self) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        self.audio.pause();
        self.status_message = Some("Paused".to_string());
        self.set_state(PlaybackState::Paused);
        true
    }

    /// Stop and rewind; cached audio is kept.
    pub fn stop(&mut self) -> bool {
        if !self.state.is_engaged() {
            return false;
        }
        self.audio.pause();
        self.audio.seek_to_start();
        self.set_progress(0.0);
        self.status_message = None;
        self.set_state(PlaybackState::Ready);
        true
    }

    fn has_valid_cache(&self) -> bool {
        self.cached_audio
            .as_ref()
            .is_some_and(|c| c.voice_id == self.selected_voice_id)
    }

    fn start_output(&mut self) -> Result<(), PlaybackError> {
        self.audio.set_rate(self.playback_speed);
        if let Err(e) = self.audio.play() {
            self.fail(e.clone());
            return Err(e);
        }
        self.status_message = Some("Playing".to_string());
        self.set_state(PlaybackState::Playing);
        Ok(())
    }

    // ── Synthesis completions ──────────────────────────────────────

    /// Wait for the next synthesis completion and apply it.
    ///
    /// Only await this after a dispatch; with nothing in flight it waits forever.
    pub async fn next_completion(&mut self) -> Option<CompletionOutcome> {
        let completion = self.completion_rx.recv().await?;
        Some(self.apply_completion(completion))
    }

    /// Apply every completion that has already arrived, without waiting.
    pub fn drain_completions(&mut self) -> Vec<CompletionOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(completion) = self.completion_rx.try_recv() {
            outcomes.push(self.apply_completion(completion));
        }
        outcomes
    }

    /// Apply a completion if it belongs to the outstanding request.
    pub fn apply_completion(&mut self, completion: SynthesisCompletion) -> CompletionOutcome {
        let is_current = self.state == PlaybackState::Processing
            && self
                .pending
                .as_ref()
                .is_some_and(|p| p.generation == completion.generation);

        if !is_current {
            tracing::debug!(
                generation = completion.generation,
                state = %self.state,
                succeeded = completion.result.is_ok(),
                "Dropping stale synthesis result"
            );
            return CompletionOutcome::Stale;
        }

        let Some(pending) = self.pending.take() else {
            return CompletionOutcome::Stale;
        };

        let clip = match completion.result {
            Ok(clip) => clip,
            Err(e) => {
                tracing::warn!(generation = pending.generation, error = %e, "Synthesis failed");
                self.fail(e.clone());
                return CompletionOutcome::Failed(e);
            }
        };

        tracing::info!(
            generation = pending.generation,
            audio_size = clip.len(),
            "Synthesis completed"
        );

        if let Err(e) = self.audio.load(&clip) {
            self.fail(e.clone());
            return CompletionOutcome::Failed(e);
        }
        self.cached_audio = Some(CachedAudio {
            voice_id: pending.voice_id,
            speed_at_generation: pending.speed,
            clip,
        });
        self.set_progress(0.0);

        match self.start_output() {
            Ok(()) => CompletionOutcome::Applied,
            Err(e) => CompletionOutcome::Failed(e),
        }
    }

    // ── Settings ───────────────────────────────────────────────────

    /// Select a voice. Invalidates cached audio and abandons any outstanding
    /// request; the next `play()` synthesizes again.
    pub fn set_voice(&mut self, voice_id: impl Into<String>) {
        let voice_id = voice_id.into();
        if voice_id == self.selected_voice_id {
            return;
        }

        tracing::debug!(voice_id = %voice_id, "Voice changed");
        self.selected_voice_id = voice_id.clone();
        self.pending = None;
        self.release_audio();
        if matches!(
            self.state,
            PlaybackState::Playing | PlaybackState::Paused | PlaybackState::Processing
        ) {
            self.status_message = None;
            self.set_state(PlaybackState::Ready);
        }
        self.emit(PlaybackEvent::VoiceChanged(voice_id));
    }

    /// Set the playback rate. Cached audio stays valid.
    pub fn set_speed(&mut self, speed: f32) -> Result<(), PlaybackError> {
        if !speed.is_finite() || !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
            return Err(PlaybackError::Validation(format!(
                "speed must be between {} and {}, got {}",
                MIN_SPEED, MAX_SPEED, speed
            )));
        }
        self.apply_speed(speed);
        Ok(())
    }

    fn adjust_speed(&mut self, delta: f32) {
        let speed = (self.playback_speed + delta).clamp(MIN_SPEED, MAX_SPEED);
        self.apply_speed(speed);
    }

    fn apply_speed(&mut self, speed: f32) {
        if speed == self.playback_speed {
            return;
        }
        self.playback_speed = speed;
        if self.cached_audio.is_some() {
            self.audio.set_rate(speed);
        }
        self.emit(PlaybackEvent::SpeedChanged(speed));
    }

    /// Voice catalog from the gateway
    pub async fn voices(&self) -> Result<Vec<Voice>, PlaybackError> {
        self.gateway.voices().await
    }

    // ── Media events ───────────────────────────────────────────────

    /// Position update from the audio output, in seconds.
    ///
    /// Zero, negative or non-finite durations leave progress unchanged.
    pub fn handle_time_update(&mut self, position: f64, duration: f64) {
        if !self.state.is_engaged() || !duration.is_finite() || duration <= 0.0 {
            return;
        }
        let progress = position / duration * 100.0;
        if progress.is_nan() {
            return;
        }
        self.set_progress(progress.clamp(0.0, 100.0));
    }

    /// End-of-media from the audio output.
    pub fn handle_ended(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.audio.seek_to_start();
        self.set_progress(0.0);
        self.status_message = Some("Finished".to_string());
        self.set_state(PlaybackState::Ready);
    }

    // ── Voice commands ─────────────────────────────────────────────

    /// Start or stop continuous listening. Returns the new listening flag.
    pub fn toggle_voice_commands(&mut self) -> Result<bool, PlaybackError> {
        if self.listening {
            self.listening = false;
            self.recognizer.stop();
            self.emit(PlaybackEvent::ListeningChanged(false));
            return Ok(false);
        }

        match self.recognizer.start() {
            Ok(()) => {
                self.listening = true;
                self.emit(PlaybackEvent::ListeningChanged(true));
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Speech recognition failed to start");
                self.notify(&e);
                Err(e)
            }
        }
    }

    /// The engine stopped. Restart it unless the user turned listening off.
    pub fn handle_recognition_end(&mut self) {
        if !self.listening {
            return;
        }
        if let Err(e) = self.recognizer.start() {
            tracing::warn!(error = %e, "Speech recognition restart failed");
            self.disable_listening(e);
        } else {
            tracing::debug!("Speech recognition restarted");
        }
    }

    /// The engine reported a failure.
    pub fn handle_recognition_error(&mut self, message: impl Into<String>) {
        self.disable_listening(PlaybackError::Recognition(message.into()));
    }

    fn disable_listening(&mut self, error: PlaybackError) {
        if self.listening {
            self.listening = false;
            self.emit(PlaybackEvent::ListeningChanged(false));
        }
        self.notify(&error);
    }

    /// Dispatch a recognized phrase. Ignored unless listening.
    pub fn handle_transcript(&mut self, transcript: &str) -> Option<VoiceCommand> {
        if !self.listening {
            return None;
        }
        let command = VoiceCommand::match_transcript(transcript, self.state)?;
        tracing::info!(command = ?command, transcript = transcript, "Voice command");
        self.emit(PlaybackEvent::CommandRecognized(command));

        match command {
            // Failures are already surfaced as notifications
            VoiceCommand::Play | VoiceCommand::Resume => {
                let _ = self.play();
            }
            VoiceCommand::Pause => {
                self.pause();
            }
            VoiceCommand::Faster => self.adjust_speed(SPEED_STEP),
            VoiceCommand::Slower => self.adjust_speed(-SPEED_STEP),
        }
        Some(command)
    }

    // ── Internals ──────────────────────────────────────────────────

    fn set_state(&mut self, next: PlaybackState) {
        if self.state == next {
            return;
        }
        tracing::debug!(from = %self.state, to = %next, "Playback state transition");
        self.state = next;
        self.emit(PlaybackEvent::StateChanged(next));
    }

    fn set_progress(&mut self, progress: f64) {
        if self.progress == progress {
            return;
        }
        self.progress = progress;
        self.emit(PlaybackEvent::Progress(progress));
    }

    fn fail(&mut self, error: PlaybackError) {
        self.notify(&error);
        self.set_state(PlaybackState::Error);
    }

    fn notify(&mut self, error: &PlaybackError) {
        self.status_message = Some(error.to_string());
        self.emit(PlaybackEvent::Notification(error.clone()));
    }

    fn emit(&self, event: PlaybackEvent) {
        // No receiver just means nobody is watching
        let _ = self.event_tx.send(event);
    }
}
