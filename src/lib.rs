//! # Scripture Reader
//!
//! A reader for scripture published as static JSON: a manifest of books and
//! chapter counts, and one document per chapter. The reader populates a book
//! and a chapter selector from the manifest, loads the selected chapter,
//! renders a heading and one paragraph per verse, and applies display
//! transforms (divine-name rendering, pronoun capitalization, image variant).
//!
//! # Site Layout
//!
//! ```text
//! site/
//! ├── config.toml            # Optional reader config
//! ├── data/
//! │   ├── chapters.json      # Manifest: book order + chapter counts
//! │   ├── Genesis/
//! │   │   ├── 1.json         # Chapter document
//! │   │   └── 2.json
//! │   └── Psalms/
//! │       └── 23.json
//! └── images/
//!     ├── temp.jpg           # Default illustrative image
//!     └── vibe.png           # Alternate image
//! ```
//!
//! # Flow
//!
//! ```text
//! manifest → chapters → content → transform
//! ```
//!
//! A book change re-runs chapter enumeration and content loading, a chapter
//! change re-runs content loading, and a toggle change re-runs only the
//! transforms. [`reader::Reader`] holds the state and drives the flow; the
//! component modules are pure functions over explicit inputs, so the logic can
//! be tested without a page.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`manifest`] | Manifest parsing and book selector options |
//! | [`chapters`] | Chapter enumeration for the selected book |
//! | [`content`] | Chapter documents, headings, verse markup scanning |
//! | [`transform`] | Divine-name, pronoun and image display transforms |
//! | [`reader`] | Reader state, event flow, failure placeholders, stale-load guard |
//! | [`source`] | The fetch seam; directory-backed implementation |
//! | [`page`] | Complete HTML page rendering using Maud |
//! | [`config`] | `config.toml` loading, merging and validation |
//! | [`check`] | Site validation against the manifest |
//! | [`output`] | CLI text formatting |
//! | [`types`] | Shared selector types |
//!
//! # Design Decisions
//!
//! ## Explicit State Over Ambient Lookups
//!
//! Selector values and toggles live in one [`reader::Reader`] value instead
//! of being read back from controls. Every component receives what it needs
//! as arguments.
//!
//! ## Latest Request Wins
//!
//! Chapter loads carry a generation number. A load that completes after a
//! newer one has started is dropped, so a slow response can never replace
//! the chapter the user asked for last. `loading.discard_stale = false`
//! restores last-to-finish-wins.
//!
//! ## Trusted Verse Markup
//!
//! Verse text is trusted, pre-sanitized content. Its inline markup is emitted
//! verbatim; only the divine-name and pronoun spans are parsed out so their
//! text can be rewritten. Everything else the page renders is escaped.

pub mod chapters;
pub mod check;
pub mod config;
pub mod content;
pub mod manifest;
pub mod output;
pub mod page;
pub mod reader;
pub mod source;
pub mod transform;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
