//! Progress watcher: bridges the transport's time-sample stream into events
//!
//! At most one watcher is alive per controller. The controller cancels the
//! previous watcher before starting a new one, and on stop, chapter change,
//! or teardown; a leaked watcher would keep feeding stale samples into the
//! next chapter's state.

use crate::state::END_OF_CHAPTER_TOLERANCE;
use crate::transition::Event;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub(crate) struct ProgressWatcher {
    handle: JoinHandle<()>,
}

impl ProgressWatcher {
    /// Consumes samples one at a time in arrival order, emitting
    /// `ProgressUpdated` for each. Once `duration` is known and a sample
    /// lands within the end-of-chapter window, emits exactly one
    /// `ChapterEnded` and terminates without reading further samples.
    pub(crate) fn spawn(
        mut samples: mpsc::Receiver<f64>,
        duration: f64,
        events: mpsc::UnboundedSender<Event>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            while let Some(time) = samples.recv().await {
                if events.send(Event::ProgressUpdated(time)).is_err() {
                    break;
                }
                if duration > 0.0 && (time - duration).abs() < END_OF_CHAPTER_TOLERANCE {
                    let _ = events.send(Event::ChapterEnded);
                    break;
                }
            }
        });

        Self { handle }
    }

    pub(crate) fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for ProgressWatcher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
