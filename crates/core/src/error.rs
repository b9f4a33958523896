//! Error types shared across ChapterStream
//!
//! Every failure the playback core can surface is non-fatal: the caller is
//! expected to show `user_message()` and retry the command that failed.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for ChapterStream
#[derive(Error, Debug)]
pub enum AppError {
    // ===== Catalog Errors =====
    /// Book bundle missing from the catalog
    #[error("Book not found: {name}")]
    BookNotFound { name: String },

    /// Book bundle present but not decodable
    #[error("Invalid book data in {file}: {reason}")]
    BookDataInvalid { file: PathBuf, reason: String },

    // ===== Audio Resolution Errors =====
    /// Audio asset missing for a chapter
    #[error("Audio file not found for chapter {chapter_id}: {file_name}")]
    ResourceNotFound {
        chapter_id: String,
        file_name: String,
    },

    /// Media inspection could not determine a duration
    #[error("Could not calculate duration of {file}")]
    DurationUnavailable {
        file: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ===== Transport Errors =====
    /// The playback engine rejected a command
    #[error("Playback engine error: {message}")]
    EngineFailure { message: String },

    // ===== Generic Errors =====
    /// General I/O error
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: io::Error,
    },

    /// Invalid argument provided
    #[error("Invalid argument: {argument} - {reason}")]
    InvalidArgument { argument: String, reason: String },
}

impl AppError {
    /// Helper to create a duration error from any underlying cause
    pub fn duration_unavailable<E: std::error::Error + Send + Sync + 'static>(
        file: impl Into<PathBuf>,
        source: E,
    ) -> Self {
        Self::DurationUnavailable {
            file: file.into(),
            source: Box::new(source),
        }
    }

    /// Helper to create an engine failure
    pub fn engine(message: impl Into<String>) -> Self {
        Self::EngineFailure {
            message: message.into(),
        }
    }

    /// Returns a user-friendly error message suitable for display in the UI
    pub fn user_message(&self) -> String {
        match self {
            Self::BookNotFound { .. } => {
                "This book could not be found. It may have been removed.".to_string()
            }
            Self::BookDataInvalid { .. } => "This book's data is damaged.".to_string(),
            Self::ResourceNotFound { .. } => {
                "The audio for this chapter is missing.".to_string()
            }
            Self::DurationUnavailable { .. } => {
                "Cannot read this chapter's audio file.".to_string()
            }
            Self::EngineFailure { .. } => "Playback failed. Please try again.".to_string(),
            Self::IoError { .. } => "A file operation failed. Please try again.".to_string(),
            Self::InvalidArgument { .. } => "Invalid input provided.".to_string(),
        }
    }

    /// Returns true if resending the failing command may succeed
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::InvalidArgument { .. })
    }
}

/// Convenience type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        Self::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_resource_not_found_display() {
        let err = AppError::ResourceNotFound {
            chapter_id: "ch-3".to_string(),
            file_name: "chapter_3.mp3".to_string(),
        };
        let display = format!("{}", err);
        assert!(display.contains("ch-3"));
        assert!(display.contains("chapter_3.mp3"));
    }

    #[test]
    fn test_duration_unavailable_keeps_source() {
        let inner = io::Error::new(io::ErrorKind::InvalidData, "bad frame");
        let err = AppError::duration_unavailable("/books/ch1.mp3", inner);

        assert!(matches!(err, AppError::DurationUnavailable { .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_engine_helper() {
        let err = AppError::engine("seek rejected");
        assert!(matches!(err, AppError::EngineFailure { .. }));
        assert!(format!("{}", err).contains("seek rejected"));
    }

    #[test]
    fn test_user_messages_hide_internals() {
        let inner = io::Error::new(io::ErrorKind::InvalidData, "EBML header");
        let err = AppError::duration_unavailable("/books/ch1.mp3", inner);
        let msg = err.user_message();
        assert!(!msg.contains("EBML"));
        assert!(!msg.is_empty());
    }

    #[test]
    fn test_playback_errors_are_retryable() {
        let errors = vec![
            AppError::BookNotFound {
                name: "cthulhu".to_string(),
            },
            AppError::ResourceNotFound {
                chapter_id: "1".to_string(),
                file_name: "a.mp3".to_string(),
            },
            AppError::engine("transport busy"),
        ];

        for err in errors {
            assert!(err.is_retryable());
        }
    }

    #[test]
    fn test_invalid_argument_not_retryable() {
        let err = AppError::InvalidArgument {
            argument: "start_index".to_string(),
            reason: "out of range".to_string(),
        };
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::IoError { .. }));
    }

    #[test]
    fn test_result_type_alias() {
        fn test_function() -> Result<i32> {
            Ok(42)
        }

        assert_eq!(test_function().unwrap(), 42);
    }
}
