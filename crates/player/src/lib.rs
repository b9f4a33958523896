//! Chapter playback controller for ChapterStream
//!
//! Coordinates audio-file resolution, duration discovery, progress
//! streaming, seek/rate changes, and automatic chapter advancement behind
//! a sequential command/event loop. Collaborators (audio source and media
//! transport) are injected as trait objects.

mod clients;
mod controller;
mod state;
mod transition;
mod watcher;

pub use clients::{AudioSource, MediaTransport, ProgressStream, ResourceUrl};
pub use controller::ChapterPlayer;
pub use state::{
    Phase, PlayerState, END_OF_CHAPTER_TOLERANCE, PLAYBACK_RATES, SKIP_BACKWARD_SECONDS,
    SKIP_FORWARD_SECONDS,
};
pub use transition::Command;

// Re-export commonly used core types
pub use chapterstream_core::{AppError, Book, Chapter, Result};
