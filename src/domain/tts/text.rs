/// Smallest accepted request, in characters.
pub const MIN_TEXT_CHARS: usize = 1;
/// Largest accepted request, in characters.
pub const MAX_TEXT_CHARS: usize = 10_000;
/// Provider-imposed limit; longer input is cut before forwarding.
pub const PROVIDER_MAX_CHARS: usize = 5_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    #[error("Text cannot be empty")]
    Empty,
    #[error("Text must be 10,000 characters or less (got {0})")]
    TooLong(usize),
}

/// Check the request bounds. Returns the character count on success.
///
/// Lengths are Unicode scalar values, not bytes.
pub fn validate_text(text: &str) -> Result<usize, TextError> {
    let char_count = text.chars().count();

    if char_count < MIN_TEXT_CHARS {
        return Err(TextError::Empty);
    }
    if char_count > MAX_TEXT_CHARS {
        return Err(TextError::TooLong(char_count));
    }

    Ok(char_count)
}

/// Keep the first `PROVIDER_MAX_CHARS` characters. Not sentence-aware.
pub fn truncate_for_provider(text: &str) -> &str {
    match text.char_indices().nth(PROVIDER_MAX_CHARS) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
