//! Book and chapter domain models
//!
//! These mirror the JSON bundle format shipped with the app: camelCase
//! keys, string identifiers assigned by the bundle author. Both types are
//! immutable once loaded.

use crate::types::Validator;
use serde::{Deserialize, Serialize};

/// A complete audiobook: metadata plus its ordered chapter list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    /// Cover image reference, resolved by the host shell
    pub cover_image: String,
    pub chapters: Vec<Chapter>,
}

impl Book {
    /// Returns the chapter at `index`, if it exists
    pub fn chapter(&self, index: usize) -> Option<&Chapter> {
        self.chapters.get(index)
    }

    /// Returns the number of chapters
    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }
}

impl Validator for Book {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.id.trim().is_empty() {
            errors.push("Book id cannot be empty".to_string());
        }

        if self.title.trim().is_empty() {
            errors.push("Title cannot be empty".to_string());
        }

        if self.chapters.is_empty() {
            errors.push("Book must contain at least one chapter".to_string());
        }

        for chapter in &self.chapters {
            if let Err(chapter_errors) = chapter.validate() {
                errors.extend(chapter_errors);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// One playable unit of a book: its text plus an audio resource reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub title: String,
    pub text: String,
    /// Opaque resource name, resolved to a playable locator externally
    pub audio_file: String,
}

impl Validator for Chapter {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.id.trim().is_empty() {
            errors.push("Chapter id cannot be empty".to_string());
        }

        if self.audio_file.trim().is_empty() {
            errors.push(format!("Chapter {} has no audio file", self.id));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
