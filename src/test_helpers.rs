//! Shared test utilities.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let mut reader = fixture_reader(tmp.path());
//! reader.select_book("Psalms");
//! reader.select_chapter("23");
//! assert_eq!(heading(&reader), "Psalm 23");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::config::load_config;
use crate::content::ChapterView;
use crate::reader::{Output, Reader};
use crate::source::DirSource;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `body` to a site-relative path, creating parent directories.
pub fn write_file(site: &Path, rel: &str, body: &str) {
    let path = site.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, body).unwrap();
}

/// A started reader over a site directory, configured from its `config.toml`.
pub fn fixture_reader(site: &Path) -> Reader<DirSource> {
    let config = load_config(site).unwrap();
    let mut reader = Reader::new(DirSource::new(site), &config);
    reader.start();
    reader
}

// =========================================================================
// Output lookups, panicking with a clear message on miss
// =========================================================================

/// The rendered chapter. Panics if the output region holds anything else.
pub fn chapter<S>(reader: &Reader<S>) -> &ChapterView
where
    S: crate::source::Source,
{
    match reader.output() {
        Output::Chapter(view) => view,
        other => panic!("expected a rendered chapter, output is {other:?}"),
    }
}

pub fn heading<S: crate::source::Source>(reader: &Reader<S>) -> &str {
    &chapter(reader).heading
}

/// Plain text of verse `n`. Panics if the chapter has no such verse.
pub fn verse_text<S: crate::source::Source>(reader: &Reader<S>, n: u32) -> String {
    let view = chapter(reader);
    view.paragraphs
        .iter()
        .find(|p| p.verse == n)
        .map(|p| p.plain_text())
        .unwrap_or_else(|| {
            let verses: Vec<u32> = view.paragraphs.iter().map(|p| p.verse).collect();
            panic!("verse {n} not in {}. Available: {verses:?}", view.heading)
        })
}

// =========================================================================
// Fixture-driven tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::TokenKind;

    #[test]
    fn fixture_site_opens_on_genesis_1() {
        let tmp = setup_fixtures();
        let reader = fixture_reader(tmp.path());
        assert_eq!(heading(&reader), "Genesis 1");
        assert_eq!(
            verse_text(&reader, 1),
            "In the beginning God created the heaven and the earth."
        );
    }

    #[test]
    fn fixture_psalm_23() {
        let tmp = setup_fixtures();
        let mut reader = fixture_reader(tmp.path());
        reader.select_book("Psalms");
        reader.select_chapter("23");
        assert_eq!(heading(&reader), "Psalm 23");
        assert_eq!(verse_text(&reader, 1), "The LORD is my shepherd; I shall not want.");

        reader.set_divine_name("Yahweh");
        reader.set_pronoun_emphasis(true);
        assert_eq!(
            verse_text(&reader, 3),
            "He restoreth my soul: He leadeth me in the paths of righteousness for His name's sake."
        );
        assert!(chapter(&reader).tokens(TokenKind::DivineName).all(|t| t.text == "Yahweh"));
    }

    #[test]
    fn fixture_single_chapter_book() {
        let tmp = setup_fixtures();
        let mut reader = fixture_reader(tmp.path());
        reader.select_book("Obadiah");
        assert!(!reader.chapters.enabled);
        assert_eq!(heading(&reader), "Obadiah");
    }

    #[test]
    fn fixture_config_is_applied() {
        let tmp = setup_fixtures();
        write_file(tmp.path(), "config.toml", "[display]\ndivine_name = \"Jehovah\"\n");
        let reader = fixture_reader(tmp.path());
        assert_eq!(reader.display.divine_name, "Jehovah");
    }

    #[test]
    fn fixture_missing_chapter_file() {
        let tmp = setup_fixtures();
        let mut reader = fixture_reader(tmp.path());
        reader.select_book("Exodus");
        assert_eq!(
            reader.output(),
            &Output::Notice(crate::reader::LOAD_FAILURE.to_string())
        );
        reader.select_book("Genesis");
        assert_eq!(heading(&reader), "Genesis 1");
    }
}
