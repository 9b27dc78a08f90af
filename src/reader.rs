//! Reader state and event flow.
//!
//! [`Reader`] owns everything a page of the reader would hold: the two
//! selectors, the display toggles, the output region and the illustrative
//! image. Its methods are the user events:
//!
//! ```text
//! start            → load_books → populate_chapters → load_chapter
//! select_book      → populate_chapters → load_chapter
//! select_chapter   → load_chapter
//! set_* (toggles)  → apply_display
//! ```
//!
//! Every component failure is caught here, logged, and turned into a
//! placeholder the user can see. Nothing is returned to the caller as an
//! error, and the reader stays usable.
//!
//! ## Chapter loads
//!
//! A load is split into [`Reader::begin_chapter_load`], the fetch, and
//! [`Reader::complete_chapter_load`] so that overlapping requests can be
//! modelled. Each request takes the next generation number; when
//! `loading.discard_stale` is set a completion from an older generation is
//! dropped.

use crate::chapters;
use crate::config::{ImagesConfig, ReaderConfig};
use crate::content::{self, ChapterView, ContentError};
use crate::manifest::{self, Manifest};
use crate::source::{FetchError, Source};
use crate::transform::{self, DisplaySettings, ImageState};
use crate::types::Selector;
use log::{debug, error, info};

/// Shown when a chapter load is triggered without a book and chapter.
pub const SELECTION_ERROR: &str = "Error selecting book and chapter";
/// Shown when a chapter fails to load.
pub const LOAD_FAILURE: &str = "Failed to load chapter. Please try again.";

/// Contents of the output region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Output {
    #[default]
    Empty,
    Chapter(ChapterView),
    /// Plain-text message.
    Notice(String),
}

/// A chapter request between its start and its completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLoad {
    pub generation: u64,
    pub path: String,
    /// Chapter count of the selected book at request time. Only used when
    /// stale loads are discarded; otherwise the count is read on completion.
    pub total_chapters: u32,
}

pub struct Reader<S> {
    source: S,
    manifest: Option<Manifest>,
    pub books: Selector,
    pub chapters: Selector,
    pub display: DisplaySettings,
    pub divine_name_choices: Vec<String>,
    images: ImagesConfig,
    discard_stale: bool,
    output: Output,
    image: ImageState,
    generation: u64,
}

impl<S: Source> Reader<S> {
    pub fn new(source: S, config: &ReaderConfig) -> Self {
        Self {
            source,
            manifest: None,
            books: Selector::default(),
            chapters: Selector::default(),
            display: DisplaySettings::from(&config.display),
            divine_name_choices: config.display.divine_name_choices.clone(),
            images: config.images.clone(),
            discard_stale: config.loading.discard_stale,
            output: Output::Empty,
            image: ImageState::default(),
            generation: 0,
        }
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    pub fn image(&self) -> &ImageState {
        &self.image
    }

    pub fn manifest(&self) -> Option<&Manifest> {
        self.manifest.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Initial page load: books, then chapters of the first book, then its
    /// first chapter.
    pub fn start(&mut self) {
        self.load_books();
        self.populate_chapters();
        self.load_chapter();
    }

    // ------------------------------------------------------------------------
    // Manifest
    // ------------------------------------------------------------------------

    pub fn load_books(&mut self) {
        match manifest::load_manifest(&self.source) {
            Ok(m) => {
                self.books.replace_options(manifest::book_options(&m));
                info!("Loaded manifest with {} books", m.order.len());
                self.manifest = Some(m);
            }
            Err(e) => {
                error!("Error loading books: {e}");
                self.books.show_error();
            }
        }
    }

    // ------------------------------------------------------------------------
    // Chapters
    // ------------------------------------------------------------------------

    pub fn populate_chapters(&mut self) {
        let book = self.books.selected.clone();
        if let Err(e) = chapters::populate(&mut self.chapters, self.manifest.as_ref(), &book) {
            error!("Error loading chapters: {e}");
        }
    }

    /// Book selection changed. Unknown values are ignored.
    pub fn select_book(&mut self, book: &str) {
        if self.books.select(book) {
            self.populate_chapters();
            self.load_chapter();
        } else {
            debug!("Ignoring selection of unknown book {book:?}");
        }
    }

    /// Chapter selection changed. Unknown values are ignored.
    pub fn select_chapter(&mut self, chapter: &str) {
        if self.chapters.select(chapter) {
            self.load_chapter();
        } else {
            debug!("Ignoring selection of unknown chapter {chapter:?}");
        }
    }

    // ------------------------------------------------------------------------
    // Content
    // ------------------------------------------------------------------------

    /// Load the selected chapter: begin, fetch and complete in one go.
    pub fn load_chapter(&mut self) {
        if let Some(pending) = self.begin_chapter_load() {
            let fetched = self.fetch(&pending);
            self.complete_chapter_load(&pending, fetched);
        }
    }

    /// Start a chapter request for the current selection.
    ///
    /// Every call supersedes requests still in flight, including one that
    /// ends in `None` (with the selection error shown) because a selector is
    /// empty.
    pub fn begin_chapter_load(&mut self) -> Option<PendingLoad> {
        self.generation += 1;
        let book = &self.books.selected;
        let chapter = &self.chapters.selected;
        if book.is_empty() || chapter.is_empty() {
            self.output = Output::Notice(SELECTION_ERROR.to_string());
            return None;
        }

        Some(PendingLoad {
            generation: self.generation,
            path: content::chapter_path(book, chapter),
            total_chapters: self.selected_book_chapters(),
        })
    }

    pub fn fetch(&self, pending: &PendingLoad) -> Result<Vec<u8>, FetchError> {
        self.source.fetch(&pending.path)
    }

    /// Finish a chapter request with the fetch result.
    ///
    /// Returns false if the result was discarded because a newer request has
    /// started since.
    pub fn complete_chapter_load(
        &mut self,
        pending: &PendingLoad,
        fetched: Result<Vec<u8>, FetchError>,
    ) -> bool {
        if self.discard_stale && pending.generation != self.generation {
            debug!(
                "Discarding {} (generation {}, current {})",
                pending.path, pending.generation, self.generation
            );
            return false;
        }

        let total_chapters = if self.discard_stale {
            pending.total_chapters
        } else {
            self.selected_book_chapters()
        };
        let rendered = fetched
            .map_err(ContentError::from)
            .and_then(|bytes| content::parse_chapter(&bytes))
            .and_then(|doc| content::render_chapter(&doc, total_chapters));

        match rendered {
            Ok(view) => {
                info!("Loaded {}: {}", pending.path, view.heading);
                self.output = Output::Chapter(view);
                self.apply_display();
            }
            Err(e) => {
                error!("Error loading {}: {e}", pending.path);
                self.output = Output::Notice(LOAD_FAILURE.to_string());
            }
        }
        true
    }

    /// Chapter count stored on the selected book option. Missing or zero
    /// counts are treated as a single chapter.
    fn selected_book_chapters(&self) -> u32 {
        self.books
            .selected_option()
            .and_then(|o| o.chapters)
            .filter(|&n| n > 0)
            .unwrap_or(1)
    }

    // ------------------------------------------------------------------------
    // Display
    // ------------------------------------------------------------------------

    pub fn set_divine_name(&mut self, rendering: &str) {
        self.display.divine_name = rendering.to_string();
        self.apply_display();
    }

    pub fn set_pronoun_emphasis(&mut self, on: bool) {
        self.display.pronoun_emphasis = on;
        self.apply_display();
    }

    pub fn set_alternate_image(&mut self, on: bool) {
        self.display.alternate_image = on;
        self.apply_display();
    }

    /// Re-run the display transforms. Does nothing until a chapter has been
    /// rendered.
    pub fn apply_display(&mut self) {
        let Output::Chapter(view) = &mut self.output else {
            return;
        };
        transform::apply(view, &self.display);
        let src = transform::image_source(&self.images, self.display.alternate_image);
        self.image.set_source(src);
    }

    /// The image finished loading its current source.
    pub fn image_loaded(&mut self) {
        self.image.loaded();
    }
}
