use serde::{Deserialize, Serialize};

use super::state::PlaybackState;

/// Speed change applied by one "faster"/"slower" command
pub const SPEED_STEP: f32 = 0.25;

/// A recognized spoken command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceCommand {
    Play,
    Pause,
    Resume,
    Faster,
    Slower,
}

const PLAY_WORDS: &[&str] = &["play", "start"];
const PAUSE_WORDS: &[&str] = &["pause", "stop"];
const RESUME_WORDS: &[&str] = &["resume", "continue"];
const FASTER_WORDS: &[&str] = &["faster", "speed up"];
const SLOWER_WORDS: &[&str] = &["slower", "slow down"];

impl VoiceCommand {
    /// Map a transcript to a command.
    ///
    /// Matching is substring containment on the lower-cased transcript and
    /// the first matching branch wins, so "play it faster" is `Play`.
    /// Pause words only count while playing, resume words only while paused.
    pub fn match_transcript(transcript: &str, state: PlaybackState) -> Option<Self> {
        let transcript = transcript.to_lowercase();
        let said = |words: &[&str]| words.iter().any(|w| transcript.contains(w));

        if said(PLAY_WORDS) {
            Some(VoiceCommand::Play)
        } else if said(PAUSE_WORDS) && state == PlaybackState::Playing {
            Some(VoiceCommand::Pause)
        } else if said(RESUME_WORDS) && state == PlaybackState::Paused {
            Some(VoiceCommand::Resume)
        } else if said(FASTER_WORDS) {
            Some(VoiceCommand::Faster)
        } else if said(SLOWER_WORDS) {
            Some(VoiceCommand::Slower)
        } else {
            None
        }
    }
}
