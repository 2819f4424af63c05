use super::text::TextError;
use crate::error::AppError;
use crate::infrastructure::repositories::ProviderError;

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("{0}")]
    TooLarge(String),
    #[error("{message}")]
    Provider { status: Option<u16>, message: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TtsServiceError {
    /// Wrap a provider failure with what we were trying to do
    pub fn provider(context: &str, err: ProviderError) -> Self {
        let status = err.status();
        let message = match status {
            Some(code) => format!("{}: {}", context, code),
            None => format!("{}: {}", context, err),
        };
        TtsServiceError::Provider { status, message }
    }

    /// Provider status code, when the provider answered at all
    pub fn provider_status(&self) -> Option<u16> {
        match self {
            TtsServiceError::Provider { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<TextError> for TtsServiceError {
    fn from(err: TextError) -> Self {
        match err {
            TextError::Empty => TtsServiceError::Invalid(err.to_string()),
            TextError::TooLong(_) => TtsServiceError::TooLarge(err.to_string()),
        }
    }
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::Invalid(msg) => AppError::BadRequest(msg),
            TtsServiceError::TooLarge(msg) => AppError::PayloadTooLarge(msg),
            e @ TtsServiceError::Provider { .. } => AppError::ExternalService(e.to_string()),
            TtsServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
