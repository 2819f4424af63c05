/// Errors surfaced by the playback controller.
///
/// Every variant is shown to the user as a transient notification.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlaybackError {
    #[error("Could not read document: {0}")]
    ReadFailure(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("{message}")]
    Provider { status: Option<u16>, message: String },

    #[error("Voice commands unavailable: {0}")]
    Recognition(String),

    #[error("Audio playback failed: {0}")]
    Output(String),

    #[error("Please upload a document first")]
    NoDocument,
}

impl PlaybackError {
    /// Synthesis failure without an HTTP status to report
    pub fn provider(detail: impl std::fmt::Display) -> Self {
        PlaybackError::Provider {
            status: None,
            message: format!("Failed to convert text to speech: {}", detail),
        }
    }

    /// Short machine-readable tag, used in logs and UI hooks
    pub fn kind(&self) -> &'static str {
        match self {
            PlaybackError::ReadFailure(_) => "read_failure",
            PlaybackError::Validation(_) => "validation_error",
            PlaybackError::Provider { .. } => "provider_error",
            PlaybackError::Recognition(_) => "recognition_error",
            PlaybackError::Output(_) => "output_error",
            PlaybackError::NoDocument => "no_document",
        }
    }
}
