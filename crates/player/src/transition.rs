//! The transition engine: a pure state machine over commands and engine events
//!
//! `transition` takes the current state and one incoming event, mutates the
//! state, and returns the effects to perform. It never touches the
//! collaborators itself; the controller executes the effects and feeds their
//! outcomes back in as new events, so every state change flows through one
//! sequential pipeline.

use crate::state::{Phase, PlayerState, SKIP_BACKWARD_SECONDS, SKIP_FORWARD_SECONDS};
use chapterstream_core::Chapter;

/// Commands the UI can issue
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Play,
    Pause,
    Stop,
    Seek(f64),
    SkipForward,
    SkipBackward,
    SetRate(f64),
    NextChapter,
    PreviousChapter,
}

/// Everything the transition engine reacts to: UI commands plus the
/// outcomes of previously scheduled effects
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Event {
    Command(Command),
    /// Duration resolution finished for the current chapter
    DurationLoaded(f64),
    /// The transport accepted load+play or resume
    TransportStarted,
    /// Elapsed-time sample from the progress watcher
    ProgressUpdated(f64),
    /// The progress watcher saw a sample within the end-of-chapter window
    ChapterEnded,
    /// An effect failed; `String` is the error's display form
    Failed(String),
    /// Teardown request; intercepted by the controller loop, never reduced
    Shutdown,
}

/// Work the controller performs after a transition
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Effect {
    /// Resolve the chapter's locator and duration, then report back
    ResolveDuration { chapter: Chapter },
    /// Resolve the locator again and tell the transport to load+play it
    Load { chapter: Chapter },
    /// Resume the already-loaded resource
    Resume,
    /// Restart the progress watcher with the now-known duration
    Watch { duration: f64 },
    PauseTransport,
    /// Cancel the watcher and stop/unload the transport
    StopTransport,
    SeekTo { seconds: f64 },
    /// Apply a rate; `paused` asks for an explicit re-pause afterwards
    ApplyRate { rate: f64, paused: bool },
    /// Feed another event through the sequential pipeline
    Dispatch(Event),
}

pub(crate) fn transition(state: &mut PlayerState, event: Event) -> Vec<Effect> {
    match event {
        Event::Command(command) => {
            state.last_error = None;
            apply_command(state, command)
        }

        Event::DurationLoaded(duration) => {
            state.duration = duration;
            state.phase = Phase::Playing;
            state.is_playing = true;
            vec![Effect::Load {
                chapter: state.current_chapter().clone(),
            }]
        }

        Event::TransportStarted => vec![Effect::Watch {
            duration: state.duration,
        }],

        Event::ProgressUpdated(time) => {
            state.elapsed = if state.duration > 0.0 {
                time.clamp(0.0, state.duration)
            } else {
                time.max(0.0)
            };
            Vec::new()
        }

        Event::ChapterEnded => {
            if state.phase != Phase::Playing {
                return Vec::new();
            }
            if state.has_next_chapter() {
                vec![Effect::Dispatch(Event::Command(Command::NextChapter))]
            } else {
                vec![Effect::Dispatch(Event::Command(Command::Stop))]
            }
        }

        Event::Failed(reason) => {
            state.last_error = Some(reason);
            Vec::new()
        }

        Event::Shutdown => Vec::new(),
    }
}

fn apply_command(state: &mut PlayerState, command: Command) -> Vec<Effect> {
    match command {
        Command::Play => match state.phase {
            // Fresh load: duration must be resolved before the transport
            // starts, so end-of-chapter detection has something to compare
            // against. Phase flips to Playing on DurationLoaded.
            Phase::NewlyLoaded | Phase::Stopped => vec![Effect::ResolveDuration {
                chapter: state.current_chapter().clone(),
            }],
            Phase::Paused => {
                state.phase = Phase::Playing;
                state.is_playing = true;
                vec![Effect::Resume]
            }
            Phase::Playing => Vec::new(),
        },

        Command::Pause => {
            if state.phase != Phase::Playing {
                return Vec::new();
            }
            state.phase = Phase::Paused;
            state.is_playing = false;
            vec![Effect::PauseTransport]
        }

        Command::Stop => {
            state.reset_playback();
            state.phase = Phase::Stopped;
            vec![Effect::StopTransport]
        }

        Command::Seek(seconds) => seek_to(state, seconds),

        Command::SkipForward => {
            let target = (state.elapsed + SKIP_FORWARD_SECONDS).min(state.duration);
            seek_to(state, target)
        }

        Command::SkipBackward => {
            let target = (state.elapsed - SKIP_BACKWARD_SECONDS).max(0.0);
            seek_to(state, target)
        }

        Command::SetRate(rate) => {
            if rate <= 0.0 {
                return Vec::new();
            }
            state.rate = rate;
            vec![Effect::ApplyRate {
                rate,
                paused: !state.is_playing,
            }]
        }

        Command::NextChapter => {
            if !state.has_next_chapter() {
                return Vec::new();
            }
            state.current_index += 1;
            state.reset_playback();
            vec![
                Effect::Dispatch(Event::Command(Command::Stop)),
                Effect::Dispatch(Event::Command(Command::Play)),
            ]
        }

        Command::PreviousChapter => {
            if !state.has_previous_chapter() {
                return Vec::new();
            }
            state.current_index -= 1;
            state.reset_playback();
            vec![
                Effect::Dispatch(Event::Command(Command::Stop)),
                Effect::Dispatch(Event::Command(Command::Play)),
            ]
        }
    }
}

fn seek_to(state: &mut PlayerState, seconds: f64) -> Vec<Effect> {
    let clamped = seconds.clamp(0.0, state.duration);
    state.elapsed = clamped;
    vec![Effect::SeekTo { seconds: clamped }]
}
