//! Manifest loading.
//!
//! The manifest lives at `data/chapters.json` and is the single source of
//! truth for both selectors:
//!
//! ```json
//! {
//!   "order": ["Genesis", "Exodus", "Leviticus"],
//!   "chapters": { "Genesis": 50, "Exodus": 40, "Leviticus": 27 }
//! }
//! ```
//!
//! `order` fixes the book list order; `chapters` maps each book to its
//! chapter count. Once loaded the manifest is never mutated.

use crate::source::{FetchError, Source};
use crate::types::SelectOption;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// Site-relative location of the manifest.
pub const MANIFEST_PATH: &str = "data/chapters.json";

/// Upper bound on a book's chapter count. Psalms, the longest book, has 150.
pub const MAX_CHAPTERS: u32 = 1000;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{book} lists {count} chapters (at most {} allowed)", MAX_CHAPTERS)]
    ChapterCount { book: String, count: u32 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    pub order: Vec<String>,
    pub chapters: HashMap<String, u32>,
}

impl Manifest {
    /// Chapter count for `book`, if the manifest knows it.
    pub fn chapter_count(&self, book: &str) -> Option<u32> {
        self.chapters.get(book).copied()
    }
}

pub fn parse_manifest(bytes: &[u8]) -> Result<Manifest, ManifestError> {
    let manifest: Manifest = serde_json::from_slice(bytes)?;
    if let Some((book, &count)) = manifest.chapters.iter().find(|(_, n)| **n > MAX_CHAPTERS) {
        return Err(ManifestError::ChapterCount {
            book: book.clone(),
            count,
        });
    }
    Ok(manifest)
}

/// Fetch and parse the manifest from `source`.
pub fn load_manifest(source: &dyn Source) -> Result<Manifest, ManifestError> {
    let bytes = source.fetch(MANIFEST_PATH)?;
    parse_manifest(&bytes)
}

/// Book selector options in manifest order, each carrying its chapter count.
pub fn book_options(manifest: &Manifest) -> Vec<SelectOption> {
    manifest
        .order
        .iter()
        .map(|book| SelectOption {
            chapters: manifest.chapter_count(book),
            ..SelectOption::new(book.as_str())
        })
        .collect()
}
