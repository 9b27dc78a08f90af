//! Site validation.
//!
//! Compares the chapter documents present under `data/` with the ones the
//! manifest promises, and parses every document that is present. Documents
//! are parsed in parallel with rayon.
//!
//! A document is invalid when it is not valid JSON, has no verses, or carries
//! verses whose chapter number differs from the one in its path.

use crate::content::{self, ContentError};
use crate::manifest::{self, Manifest, ManifestError};
use crate::source::DirSource;
use rayon::prelude::*;
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

#[derive(Debug, Default)]
pub struct CheckReport {
    pub books: usize,
    /// Chapter documents the manifest promises.
    pub expected: usize,
    /// Documents present and parsed.
    pub checked: usize,
    /// Books listed in `order` without a chapter count.
    pub uncounted_books: Vec<String>,
    pub missing: Vec<String>,
    /// JSON files under `data/` the manifest does not account for.
    pub unexpected: Vec<String>,
    /// `(path, reason)` for documents that failed to validate.
    pub invalid: Vec<(String, String)>,
}

impl CheckReport {
    pub fn is_ok(&self, allow_missing: bool) -> bool {
        self.invalid.is_empty()
            && self.uncounted_books.is_empty()
            && (allow_missing || self.missing.is_empty())
    }
}

/// Every chapter path the manifest promises, in reading order, paired with
/// its chapter number.
pub fn expected_documents(manifest: &Manifest) -> Vec<(String, u32)> {
    manifest
        .order
        .iter()
        .filter_map(|book| manifest.chapter_count(book).map(|n| (book, n)))
        .flat_map(|(book, n)| (1..=n).map(move |c| (content::chapter_path(book, &c.to_string()), c)))
        .collect()
}

pub fn check(site: &Path) -> Result<CheckReport, CheckError> {
    let source = DirSource::new(site);
    let manifest = manifest::load_manifest(&source)?;
    let expected = expected_documents(&manifest);
    let present = present_documents(site)?;

    let expected_paths: HashSet<&str> = expected.iter().map(|(p, _)| p.as_str()).collect();
    let missing = expected
        .iter()
        .filter(|(p, _)| !present.contains(p))
        .map(|(p, _)| p.clone())
        .collect();
    let unexpected = present
        .iter()
        .filter(|p| !expected_paths.contains(p.as_str()))
        .cloned()
        .collect();

    let to_check: Vec<&(String, u32)> = expected.iter().filter(|(p, _)| present.contains(p)).collect();
    let invalid = to_check
        .par_iter()
        .filter_map(|(path, chapter)| {
            validate_document(&site.join(path), *chapter)
                .err()
                .map(|reason| (path.clone(), reason))
        })
        .collect();

    Ok(CheckReport {
        books: manifest.order.len(),
        expected: expected.len(),
        checked: to_check.len(),
        uncounted_books: manifest
            .order
            .iter()
            .filter(|b| manifest.chapter_count(b).is_none())
            .cloned()
            .collect(),
        missing,
        unexpected,
        invalid,
    })
}

/// Site-relative paths of all chapter documents under `data/`.
fn present_documents(site: &Path) -> Result<BTreeSet<String>, CheckError> {
    let data = site.join("data");
    let mut found = BTreeSet::new();
    if !data.is_dir() {
        return Ok(found);
    }
    for entry in WalkDir::new(&data).min_depth(2).max_depth(2) {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|e| e != "json") {
            continue;
        }
        let Ok(rel) = path.strip_prefix(site) else {
            continue;
        };
        let parts: Vec<_> = rel.components().map(|c| c.as_os_str().to_string_lossy()).collect();
        found.insert(parts.join("/"));
    }
    Ok(found)
}

fn validate_document(path: &Path, chapter: u32) -> Result<(), String> {
    let bytes = fs::read(path).map_err(|e| e.to_string())?;
    let doc = content::parse_chapter(&bytes).map_err(|e| e.to_string())?;
    if doc.verses.is_empty() {
        return Err(ContentError::Empty.to_string());
    }
    match doc.verses.iter().find(|v| v.chapter != chapter) {
        Some(v) => Err(format!(
            "verse {} is marked chapter {}, expected {}",
            v.verse, v.chapter, chapter
        )),
        None => Ok(()),
    }
}
