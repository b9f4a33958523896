//! Book bundle loading
//!
//! A bundle is a directory holding `<name>.json` book files (camelCase
//! keys) next to the audio assets their chapters reference.

use async_trait::async_trait;
use chapterstream_core::{AppError, Book, Result, Validator};
use log::{info, warn};
use std::path::PathBuf;

/// Loads a book's metadata and ordered chapter list
#[async_trait]
pub trait BookCatalog: Send + Sync {
    async fn load_book(&self) -> Result<Book>;
}

/// Catalog backed by a directory of JSON book bundles
pub struct BundleCatalog {
    root: PathBuf,
    book_name: String,
}

impl BundleCatalog {
    /// `book_name` is the bundle the [`BookCatalog`] impl loads, without
    /// the `.json` extension
    pub fn new(root: impl Into<PathBuf>, book_name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            book_name: book_name.into(),
        }
    }

    /// Loads and validates one bundle by name
    pub async fn load_book_named(&self, name: &str) -> Result<Book> {
        let path = self.root.join(format!("{}.json", name));
        let data = tokio::fs::read(&path)
            .await
            .map_err(|_| AppError::BookNotFound {
                name: name.to_string(),
            })?;

        let book: Book =
            serde_json::from_slice(&data).map_err(|err| AppError::BookDataInvalid {
                file: path.clone(),
                reason: err.to_string(),
            })?;

        if let Err(errors) = book.validate() {
            return Err(AppError::BookDataInvalid {
                file: path,
                reason: errors.join("; "),
            });
        }

        Ok(book)
    }

    /// Loads every readable bundle in the directory, sorted by title.
    ///
    /// Unreadable or invalid bundles are skipped with a warning rather than
    /// failing the whole listing.
    pub async fn load_books(&self) -> Result<Vec<Book>> {
        let mut books = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.root).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match self.load_book_named(name).await {
                Ok(book) => books.push(book),
                Err(err) => warn!("skipping bundle {}: {}", path.display(), err),
            }
        }

        books.sort_by(|a, b| a.title.cmp(&b.title));
        info!("loaded {} book(s) from {}", books.len(), self.root.display());
        Ok(books)
    }
}

#[async_trait]
impl BookCatalog for BundleCatalog {
    async fn load_book(&self) -> Result<Book> {
        self.load_book_named(&self.book_name).await
    }
}
