//! The chapter playback controller
//!
//! [`ChapterPlayer`] is the public surface: a handle whose command methods
//! feed a sequential event queue consumed by a single spawned loop. The
//! loop owns the state, runs the transition engine, executes the resulting
//! effects against the collaborators, and publishes every state revision
//! through a watch channel.

use crate::clients::{AudioSource, MediaTransport};
use crate::state::{Phase, PlayerState};
use crate::transition::{transition, Command, Effect, Event};
use crate::watcher::ProgressWatcher;
use chapterstream_core::{AppError, Chapter, Result};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Handle to a running chapter player
///
/// Commands are processed strictly in the order they are issued. Dropping
/// the handle requests teardown: the transport is stopped and the progress
/// watcher cancelled; use [`shutdown`](Self::shutdown) to wait for that to
/// complete.
pub struct ChapterPlayer {
    events: mpsc::UnboundedSender<Event>,
    state: watch::Receiver<PlayerState>,
    task: Option<JoinHandle<()>>,
}

impl ChapterPlayer {
    /// Starts a player for `chapters`, positioned at `start_index`.
    ///
    /// Must be called from within a tokio runtime. Fails if the chapter
    /// list is empty or the index is out of range.
    pub fn spawn(
        chapters: Vec<Chapter>,
        start_index: usize,
        audio: Arc<dyn AudioSource>,
        transport: Arc<dyn MediaTransport>,
    ) -> Result<Self> {
        if chapters.is_empty() {
            return Err(AppError::InvalidArgument {
                argument: "chapters".to_string(),
                reason: "chapter list cannot be empty".to_string(),
            });
        }
        if start_index >= chapters.len() {
            return Err(AppError::InvalidArgument {
                argument: "start_index".to_string(),
                reason: format!("{} out of range for {} chapters", start_index, chapters.len()),
            });
        }

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let state = PlayerState::new(chapters.into(), start_index);
        let (state_tx, state_rx) = watch::channel(state.clone());

        let player_loop = PlayerLoop {
            state,
            audio,
            transport,
            events_tx: events_tx.clone(),
            events_rx,
            state_tx,
            watcher: None,
        };
        let task = tokio::spawn(player_loop.run());

        Ok(Self {
            events: events_tx,
            state: state_rx,
            task: Some(task),
        })
    }

    pub fn play(&self) {
        self.command(Command::Play);
    }

    pub fn pause(&self) {
        self.command(Command::Pause);
    }

    pub fn stop(&self) {
        self.command(Command::Stop);
    }

    pub fn seek(&self, seconds: f64) {
        self.command(Command::Seek(seconds));
    }

    pub fn skip_forward(&self) {
        self.command(Command::SkipForward);
    }

    pub fn skip_backward(&self) {
        self.command(Command::SkipBackward);
    }

    pub fn set_rate(&self, rate: f64) {
        self.command(Command::SetRate(rate));
    }

    pub fn next_chapter(&self) {
        self.command(Command::NextChapter);
    }

    pub fn previous_chapter(&self) {
        self.command(Command::PreviousChapter);
    }

    /// Snapshot of the current playback state
    pub fn state(&self) -> PlayerState {
        self.state.borrow().clone()
    }

    /// Watch receiver updated after every processed command and event
    pub fn subscribe(&self) -> watch::Receiver<PlayerState> {
        self.state.clone()
    }

    /// Requests teardown and waits for the transport to be stopped
    pub async fn shutdown(mut self) {
        let _ = self.events.send(Event::Shutdown);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    fn command(&self, command: Command) {
        if self.events.send(Event::Command(command)).is_err() {
            log::warn!("player loop is gone; dropping {:?}", command);
        }
    }
}

impl Drop for ChapterPlayer {
    fn drop(&mut self) {
        // shutdown() already consumed the task when it was called explicitly
        if self.task.is_some() {
            let _ = self.events.send(Event::Shutdown);
        }
    }
}

/// The sequential owner of the playback state
struct PlayerLoop {
    state: PlayerState,
    audio: Arc<dyn AudioSource>,
    transport: Arc<dyn MediaTransport>,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
    state_tx: watch::Sender<PlayerState>,
    watcher: Option<ProgressWatcher>,
}

impl PlayerLoop {
    async fn run(mut self) {
        while let Some(event) = self.events_rx.recv().await {
            if matches!(event, Event::Shutdown) {
                self.teardown().await;
                break;
            }

            log::debug!("processing {:?}", event);
            let effects = transition(&mut self.state, event);
            self.state_tx.send_replace(self.state.clone());

            for effect in effects {
                self.execute(effect).await;
            }
        }
    }

    async fn teardown(&mut self) {
        if let Some(watcher) = self.watcher.take() {
            watcher.cancel();
        }
        self.transport.stop().await;
        self.state.reset_playback();
        self.state.phase = Phase::Stopped;
        self.state_tx.send_replace(self.state.clone());
        log::debug!("player loop torn down");
    }

    async fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::ResolveDuration { chapter } => {
                let audio = Arc::clone(&self.audio);
                let events = self.events_tx.clone();
                tokio::spawn(async move {
                    let resolved = match audio.resolve(&chapter).await {
                        Ok(url) => audio.duration(&url).await,
                        Err(err) => Err(err),
                    };
                    let event = match resolved {
                        Ok(duration) => Event::DurationLoaded(duration),
                        Err(err) => {
                            log::warn!("duration resolution failed for chapter {}: {}", chapter.id, err);
                            Event::Failed(err.to_string())
                        }
                    };
                    let _ = events.send(event);
                });
            }

            Effect::Load { chapter } => {
                let audio = Arc::clone(&self.audio);
                let transport = Arc::clone(&self.transport);
                let events = self.events_tx.clone();
                tokio::spawn(async move {
                    let started = match audio.resolve(&chapter).await {
                        Ok(url) => transport.play(&url).await,
                        Err(err) => Err(err),
                    };
                    let event = match started {
                        Ok(()) => Event::TransportStarted,
                        Err(err) => {
                            log::warn!("transport start failed for chapter {}: {}", chapter.id, err);
                            Event::Failed(err.to_string())
                        }
                    };
                    let _ = events.send(event);
                });
            }

            Effect::Resume => {
                let transport = Arc::clone(&self.transport);
                let events = self.events_tx.clone();
                tokio::spawn(async move {
                    transport.resume().await;
                    let _ = events.send(Event::TransportStarted);
                });
            }

            Effect::Watch { duration } => {
                if let Some(previous) = self.watcher.take() {
                    previous.cancel();
                }
                let samples = self.transport.observe_progress().await;
                self.watcher = Some(ProgressWatcher::spawn(
                    samples,
                    duration,
                    self.events_tx.clone(),
                ));
            }

            Effect::PauseTransport => self.transport.pause().await,

            Effect::StopTransport => {
                if let Some(watcher) = self.watcher.take() {
                    watcher.cancel();
                }
                self.transport.stop().await;
            }

            Effect::SeekTo { seconds } => self.transport.seek(seconds).await,

            Effect::ApplyRate { rate, paused } => {
                self.transport.set_rate(rate, paused).await;
                if paused {
                    // Rate changes can implicitly resume some transports;
                    // force the transport back into the paused state.
                    self.transport.pause().await;
                }
            }

            Effect::Dispatch(event) => {
                let _ = self.events_tx.send(event);
            }
        }
    }
}
