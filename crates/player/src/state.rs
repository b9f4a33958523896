//! Playback state owned by the chapter player

use chapterstream_core::Chapter;
use std::sync::Arc;

/// Playback rates offered by the UI; the transport accepts any positive value
pub const PLAYBACK_RATES: [f64; 4] = [0.5, 1.0, 1.5, 2.0];

/// Window in seconds within which an elapsed sample counts as end-of-chapter
pub const END_OF_CHAPTER_TOLERANCE: f64 = 0.25;

/// Seconds added by a forward skip
pub const SKIP_FORWARD_SECONDS: f64 = 10.0;

/// Seconds removed by a backward skip
pub const SKIP_BACKWARD_SECONDS: f64 = 5.0;

/// Playback lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Chapter selected, nothing resolved or played yet
    NewlyLoaded,
    Playing,
    Paused,
    Stopped,
}

/// The single source of truth for chapter playback
///
/// Mutated only by the transition engine; snapshots are published to the
/// caller after every processed event.
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub(crate) chapters: Arc<[Chapter]>,
    pub(crate) current_index: usize,
    pub(crate) phase: Phase,
    pub(crate) is_playing: bool,
    pub(crate) elapsed: f64,
    pub(crate) duration: f64,
    pub(crate) rate: f64,
    pub(crate) last_error: Option<String>,
}

impl PlayerState {
    pub(crate) fn new(chapters: Arc<[Chapter]>, start_index: usize) -> Self {
        Self {
            chapters,
            current_index: start_index,
            phase: Phase::NewlyLoaded,
            is_playing: false,
            elapsed: 0.0,
            duration: 0.0,
            rate: 1.0,
            last_error: None,
        }
    }

    /// The ordered chapter sequence for the current book
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Index of the chapter currently selected; always in range
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The chapter currently selected
    pub fn current_chapter(&self) -> &Chapter {
        &self.chapters[self.current_index]
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Elapsed seconds within the current chapter
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Chapter duration in seconds; `0.0` means not yet resolved
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Description of the most recent failure, cleared on the next command
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn has_next_chapter(&self) -> bool {
        self.current_index + 1 < self.chapters.len()
    }

    pub fn has_previous_chapter(&self) -> bool {
        self.current_index > 0
    }

    pub fn progress_percentage(&self) -> f32 {
        if self.duration == 0.0 {
            return 0.0;
        }
        ((self.elapsed / self.duration) * 100.0) as f32
    }

    pub(crate) fn reset_playback(&mut self) {
        self.is_playing = false;
        self.elapsed = 0.0;
        self.duration = 0.0;
        self.rate = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapters(count: usize) -> Arc<[Chapter]> {
        (0..count)
            .map(|i| Chapter {
                id: format!("{}", i + 1),
                title: format!("Chapter {}", i + 1),
                text: String::new(),
                audio_file: format!("chapter_{}.mp3", i + 1),
            })
            .collect()
    }

    #[test]
    fn test_new_state_defaults() {
        let state = PlayerState::new(chapters(3), 0);
        assert_eq!(state.phase(), Phase::NewlyLoaded);
        assert!(!state.is_playing());
        assert_eq!(state.elapsed(), 0.0);
        assert_eq!(state.duration(), 0.0);
        assert_eq!(state.rate(), 1.0);
        assert!(state.last_error().is_none());
    }

    #[test]
    fn test_current_chapter() {
        let state = PlayerState::new(chapters(3), 1);
        assert_eq!(state.current_chapter().id, "2");
    }

    #[test]
    fn test_chapter_bounds_queries() {
        let state = PlayerState::new(chapters(2), 0);
        assert!(state.has_next_chapter());
        assert!(!state.has_previous_chapter());

        let state = PlayerState::new(chapters(2), 1);
        assert!(!state.has_next_chapter());
        assert!(state.has_previous_chapter());
    }

    #[test]
    fn test_reset_playback() {
        let mut state = PlayerState::new(chapters(1), 0);
        state.is_playing = true;
        state.elapsed = 42.0;
        state.duration = 100.0;
        state.rate = 2.0;

        state.reset_playback();

        assert!(!state.is_playing);
        assert_eq!(state.elapsed, 0.0);
        assert_eq!(state.duration, 0.0);
        assert_eq!(state.rate, 1.0);
    }

    #[test]
    fn test_progress_percentage() {
        let mut state = PlayerState::new(chapters(1), 0);
        state.duration = 100.0;
        state.elapsed = 50.0;
        assert_eq!(state.progress_percentage(), 50.0);
    }

    #[test]
    fn test_progress_percentage_unknown_duration() {
        let state = PlayerState::new(chapters(1), 0);
        assert_eq!(state.progress_percentage(), 0.0);
    }
}
