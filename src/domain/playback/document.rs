use chrono::{DateTime, Utc};
use std::path::Path;

use super::error::PlaybackError;

/// Extensions offered by the file picker. Only plain-text decoding is
/// implemented, so binary PDF/DOCX content fails with `ReadFailure`.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["txt", "md", "pdf", "docx"];

const UTF8_BOM: char = '\u{feff}';

/// A file handed over by the picker, before decoding.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            mime_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Read a file from disk
    pub async fn read(path: impl AsRef<Path>) -> Result<Self, PlaybackError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| PlaybackError::ReadFailure(format!("{} is not a file", path.display())))?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| PlaybackError::ReadFailure(format!("{}: {}", name, e)))?;

        Ok(Self::new(name, bytes))
    }
}

/// A decoded document. Immutable once loaded; edits require a new upload.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub name: String,
    pub content: String,
    pub mime_type: String,
    pub loaded_at: DateTime<Utc>,
}

impl Document {
    /// Decode a selected file as UTF-8 text
    pub fn from_file(file: SelectedFile) -> Result<Self, PlaybackError> {
        let extension = extension_of(&file.name).ok_or_else(|| {
            PlaybackError::ReadFailure(format!("{} has no file extension", file.name))
        })?;

        if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(PlaybackError::ReadFailure(format!(
                "unsupported file type .{} (expected one of: {})",
                extension,
                ACCEPTED_EXTENSIONS.join(", ")
            )));
        }

        let mime_type = file
            .mime_type
            .unwrap_or_else(|| mime_for_extension(&extension).to_string());

        let content = String::from_utf8(file.bytes).map_err(|e| {
            PlaybackError::ReadFailure(format!("{} is not valid UTF-8 text: {}", file.name, e))
        })?;
        let content = match content.strip_prefix(UTF8_BOM) {
            Some(stripped) => stripped.to_string(),
            None => content,
        };

        Ok(Self {
            name: file.name,
            content,
            mime_type,
            loaded_at: Utc::now(),
        })
    }

    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

fn mime_for_extension(extension: &str) -> &'static str {
    match extension {
        "txt" => "text/plain",
        "md" => "text/markdown",
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}
