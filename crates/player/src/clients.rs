//! Collaborator contracts the playback controller depends on
//!
//! All three collaborators are constructor-supplied trait objects so the
//! host shell (or a test) can swap implementations.

use async_trait::async_trait;
use chapterstream_core::{Chapter, Result};
use std::fmt;
use tokio::sync::mpsc;

/// Playable location of a chapter's audio, as produced by an [`AudioSource`]
///
/// Opaque to the controller; only the transport interprets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceUrl(String);

impl ResourceUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Live sequence of elapsed-time samples in seconds, terminated when the
/// transport stops or the sender is dropped
pub type ProgressStream = mpsc::Receiver<f64>;

/// Resolves chapters to playable locators and inspects their duration
#[async_trait]
pub trait AudioSource: Send + Sync {
    /// Resolves the chapter's audio reference to a playable locator.
    ///
    /// Fails with [`AppError::ResourceNotFound`] naming the chapter and the
    /// expected resource when the asset is missing.
    ///
    /// [`AppError::ResourceNotFound`]: chapterstream_core::AppError::ResourceNotFound
    async fn resolve(&self, chapter: &Chapter) -> Result<ResourceUrl>;

    /// Computes the duration of the resolved audio in seconds.
    ///
    /// Fails with [`AppError::DurationUnavailable`] wrapping the underlying
    /// cause when the media cannot be inspected.
    ///
    /// [`AppError::DurationUnavailable`]: chapterstream_core::AppError::DurationUnavailable
    async fn duration(&self, url: &ResourceUrl) -> Result<f64>;
}

/// Black-box audio transport supplied by the host shell
///
/// The controller is the only writer: it issues every command and is the
/// sole consumer of the progress stream.
#[async_trait]
pub trait MediaTransport: Send + Sync {
    /// Loads the resource and starts playing it from the beginning
    async fn play(&self, url: &ResourceUrl) -> Result<()>;

    /// Resumes the currently loaded resource without reloading
    async fn resume(&self);

    /// Pauses the transport, keeping the loaded resource
    async fn pause(&self);

    /// Stops playback and unloads the resource
    async fn stop(&self);

    /// Seeks to an absolute position in seconds, preserving the rate
    async fn seek(&self, seconds: f64);

    /// Applies a playback rate.
    ///
    /// `paused` hints that the controller considers playback paused. Some
    /// engines implicitly resume when the rate changes; the controller
    /// re-pauses explicitly afterwards, so implementations need not handle
    /// the hint themselves.
    async fn set_rate(&self, rate: f64, paused: bool);

    /// Opens a fresh stream of elapsed-time samples.
    ///
    /// The controller reads samples one at a time in arrival order and
    /// drops the stream when it no longer cares; the transport must stop
    /// producing once the receiver is gone.
    async fn observe_progress(&self) -> ProgressStream;
}
