//! Error types for the Bearnotes core library.

use thiserror::Error;

/// All errors that can occur within the Bearnotes core library.
#[derive(Debug, Error)]
pub enum BearnotesError {
    /// A note ID was requested that does not exist in the store.
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    /// A storage key contained path separators or was otherwise unusable.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// An export format string did not name a supported format.
    #[error("Invalid export format: {0}")]
    InvalidFormat(String),

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted data could not be serialized or deserialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias that pins the error type to [`BearnotesError`].
pub type Result<T> = std::result::Result<T, BearnotesError>;

impl BearnotesError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NoteNotFound(_) => "Note no longer exists".to_string(),
            Self::InvalidKey(key) => format!("Cannot store data under '{key}'"),
            Self::InvalidFormat(format) => format!("Unsupported export format: {format}"),
            Self::Io(e) => format!("File error: {e}"),
            Self::Json(e) => format!("Data format error: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_not_found_hides_id_from_user() {
        let e = BearnotesError::NoteNotFound("abc-123".to_string());
        assert!(e.to_string().contains("abc-123"));
        assert_eq!(e.user_message(), "Note no longer exists");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let e: BearnotesError = io.into();
        assert!(e.user_message().starts_with("File error"));
    }
}
