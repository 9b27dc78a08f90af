//! Chapter enumeration for the selected book.

use crate::manifest::Manifest;
use crate::types::{SelectOption, Selector};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ChapterError {
    #[error("No manifest loaded")]
    NoManifest,
    #[error("No book selected")]
    NoBook,
    #[error("Book not in manifest: {0}")]
    UnknownBook(String),
}

/// The chapters `1..=count` of `book`.
pub fn enumerate_chapters(manifest: &Manifest, book: &str) -> Result<Vec<u32>, ChapterError> {
    if book.is_empty() {
        return Err(ChapterError::NoBook);
    }
    let count = manifest
        .chapter_count(book)
        .ok_or_else(|| ChapterError::UnknownBook(book.to_string()))?;
    Ok((1..=count).collect())
}

pub fn chapter_options(chapters: &[u32]) -> Vec<SelectOption> {
    chapters.iter().map(|c| SelectOption::new(c.to_string())).collect()
}

/// Repopulate `selector` with the chapters of `book`.
///
/// The selector is disabled for the duration and only re-enabled when there
/// is more than one chapter to choose from. On failure it keeps a single
/// error option and stays disabled.
pub fn populate(
    selector: &mut Selector,
    manifest: Option<&Manifest>,
    book: &str,
) -> Result<(), ChapterError> {
    selector.enabled = false;
    let result = manifest
        .ok_or(ChapterError::NoManifest)
        .and_then(|m| enumerate_chapters(m, book));
    match result {
        Ok(chapters) => {
            selector.replace_options(chapter_options(&chapters));
            selector.enabled = chapters.len() > 1;
            Ok(())
        }
        Err(e) => {
            selector.show_error();
            Err(e)
        }
    }
}
