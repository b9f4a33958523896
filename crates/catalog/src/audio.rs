//! Filesystem-backed audio resolution
//!
//! Resolves chapter audio references against the bundle directory and
//! probes the files for their duration.

use async_trait::async_trait;
use chapterstream_core::{AppError, Chapter, Result};
use chapterstream_player::{AudioSource, ResourceUrl};
use lofty::prelude::*;
use lofty::probe::Probe;
use std::path::PathBuf;

/// [`AudioSource`] reading chapter audio from the bundle directory
pub struct BundleAudioSource {
    root: PathBuf,
}

impl BundleAudioSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl AudioSource for BundleAudioSource {
    async fn resolve(&self, chapter: &Chapter) -> Result<ResourceUrl> {
        let path = self.root.join(&chapter.audio_file);
        let exists = tokio::fs::try_exists(&path).await.unwrap_or(false);
        if !exists {
            return Err(AppError::ResourceNotFound {
                chapter_id: chapter.id.clone(),
                file_name: chapter.audio_file.clone(),
            });
        }
        Ok(ResourceUrl::new(path.to_string_lossy()))
    }

    async fn duration(&self, url: &ResourceUrl) -> Result<f64> {
        let path = PathBuf::from(url.as_str());
        let seconds = tokio::task::spawn_blocking(move || -> Result<f64> {
            let tagged = Probe::open(&path)
                .map_err(|err| AppError::duration_unavailable(&path, err))?
                .read()
                .map_err(|err| AppError::duration_unavailable(&path, err))?;
            Ok(tagged.properties().duration().as_secs_f64())
        })
        .await
        .map_err(|err| AppError::engine(format!("duration probe task failed: {}", err)))??;

        Ok(seconds)
    }
}
