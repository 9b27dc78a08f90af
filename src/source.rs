//! Resource fetching.
//!
//! The [`Source`] trait is the single seam between the reader and wherever its
//! static assets live. Paths are always site-relative and `/`-separated, e.g.
//! `data/chapters.json` or `data/Genesis/1.json`.
//!
//! The production implementation is [`DirSource`], which serves a site
//! directory from disk. A missing file is reported as [`FetchError::NotFound`],
//! the filesystem counterpart of a non-success HTTP status.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Invalid resource path: {0}")]
    InvalidPath(String),
}

/// Read-only access to the site's static assets.
pub trait Source {
    /// Fetch the raw bytes of a site-relative resource.
    fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError>;
}

/// Serves resources from a site directory on disk.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a site-relative path onto the root, refusing anything that could
    /// escape it (`..`, absolute paths).
    fn resolve(&self, path: &str) -> Result<PathBuf, FetchError> {
        let rel = Path::new(path);
        if rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(FetchError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(rel))
    }
}

impl Source for DirSource {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        let full = self.resolve(path)?;
        match fs::read(&full) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(FetchError::NotFound(path.to_string())),
            Err(e) => Err(FetchError::Io(e)),
        }
    }
}
