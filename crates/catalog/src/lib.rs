//! Book catalog for ChapterStream
//!
//! JSON bundle loading plus the filesystem implementation of the player's
//! audio-source contract.

mod audio;
mod loader;

pub use audio::BundleAudioSource;
pub use loader::{BookCatalog, BundleCatalog};

// Re-export commonly used core types
pub use chapterstream_core::{AppError, Book, Chapter, Result};
