//! Chapter documents and their rendered form.
//!
//! Each chapter lives at `data/<book>/<chapter>.json`:
//!
//! ```json
//! {
//!   "verses": [
//!     { "book_name": "Genesis", "chapter": 1, "verse": 1,
//!       "text": "In the beginning God created the heaven and the earth." }
//!   ]
//! }
//! ```
//!
//! Verse text is trusted, pre-sanitized content and may carry inline markup,
//! which is passed through verbatim. Two kinds of span are recognised as
//! substitutable tokens:
//!
//! - `<span class="yhwh">LORD</span>`: divine-name token
//! - `<span class="pro">he</span>`: pronoun token
//!
//! Everything else (including unrecognised spans) stays as opaque markup.

use crate::source::{FetchError, Source};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Chapter document has no verses")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Verse {
    pub book_name: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChapterDocument {
    pub verses: Vec<Verse>,
}

/// Site-relative path of a chapter document.
pub fn chapter_path(book: &str, chapter: &str) -> String {
    format!("data/{book}/{chapter}.json")
}

pub fn parse_chapter(bytes: &[u8]) -> Result<ChapterDocument, ContentError> {
    Ok(serde_json::from_slice(bytes)?)
}

pub fn load_chapter(
    source: &dyn Source,
    book: &str,
    chapter: &str,
) -> Result<ChapterDocument, ContentError> {
    let bytes = source.fetch(&chapter_path(book, chapter))?;
    parse_chapter(&bytes)
}

// ============================================================================
// Rendered content
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    DivineName,
    Pronoun,
}

impl TokenKind {
    /// Marker class identifying this token kind in verse markup.
    pub fn class(self) -> &'static str {
        match self {
            TokenKind::DivineName => "yhwh",
            TokenKind::Pronoun => "pro",
        }
    }
}

/// A substitutable span. Only `text` is ever rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Opening tag as written in the verse text, re-emitted unchanged.
    pub open_tag: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Verbatim verse markup.
    Markup(String),
    Token(Token),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub verse: u32,
    pub segments: Vec<Segment>,
}

impl Paragraph {
    /// Verse text as a reader would see it: tags dropped, tokens showing
    /// their current text.
    pub fn plain_text(&self) -> String {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Markup(m) => decode_entities(&strip_tags(m)),
                Segment::Token(t) => t.text.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterView {
    pub heading: String,
    pub paragraphs: Vec<Paragraph>,
}

impl ChapterView {
    pub fn tokens(&self, kind: TokenKind) -> impl Iterator<Item = &Token> {
        self.paragraphs
            .iter()
            .flat_map(|p| p.segments.iter())
            .filter_map(move |s| match s {
                Segment::Token(t) if t.kind == kind => Some(t),
                _ => None,
            })
    }

    pub fn tokens_mut(&mut self, kind: TokenKind) -> impl Iterator<Item = &mut Token> {
        self.paragraphs
            .iter_mut()
            .flat_map(|p| p.segments.iter_mut())
            .filter_map(move |s| match s {
                Segment::Token(t) if t.kind == kind => Some(t),
                _ => None,
            })
    }
}

/// Book name as shown in a heading. The book of Psalms is headed in the
/// singular ("Psalm 23").
pub fn display_book_name(book_name: &str) -> &str {
    if book_name == "Psalms" { "Psalm" } else { book_name }
}

/// Heading for a chapter: `"<Book> <chapter>"`, or just the book name when
/// the book has a single chapter.
pub fn heading_text(book_name: &str, chapter: u32, total_chapters: u32) -> String {
    let name = display_book_name(book_name);
    if total_chapters > 1 {
        format!("{name} {chapter}")
    } else {
        name.to_string()
    }
}

/// Build the rendered view of a chapter. The heading is taken from the first
/// verse record.
pub fn render_chapter(
    doc: &ChapterDocument,
    total_chapters: u32,
) -> Result<ChapterView, ContentError> {
    let first = doc.verses.first().ok_or(ContentError::Empty)?;
    let heading = heading_text(&first.book_name, first.chapter, total_chapters);
    let paragraphs = doc
        .verses
        .iter()
        .map(|v| Paragraph {
            verse: v.verse,
            segments: parse_verse_text(&v.text),
        })
        .collect();
    Ok(ChapterView {
        heading,
        paragraphs,
    })
}

// ============================================================================
// Inline markup scanning
// ============================================================================

const SPAN_OPEN: &str = "<span";
const SPAN_CLOSE: &str = "</span>";

/// Split verse text into verbatim markup and substitutable tokens.
pub fn parse_verse_text(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut markup = String::new();
    let mut rest = text;

    while let Some(start) = rest.find(SPAN_OPEN) {
        let tail = &rest[start..];
        let is_span = tail[SPAN_OPEN.len()..]
            .chars()
            .next()
            .is_some_and(|c| c == '>' || c.is_whitespace());
        let Some(tag_end) = tag_end(tail).filter(|_| is_span) else {
            markup.push_str(&rest[..start + SPAN_OPEN.len()]);
            rest = &rest[start + SPAN_OPEN.len()..];
            continue;
        };

        let open_tag = &tail[..=tag_end];
        let body = &tail[tag_end + 1..];
        match (token_kind(open_tag), body.find(SPAN_CLOSE)) {
            (Some(kind), Some(close)) => {
                markup.push_str(&rest[..start]);
                if !markup.is_empty() {
                    segments.push(Segment::Markup(std::mem::take(&mut markup)));
                }
                segments.push(Segment::Token(Token {
                    kind,
                    open_tag: open_tag.to_string(),
                    text: decode_entities(&strip_tags(&body[..close])),
                }));
                rest = &body[close + SPAN_CLOSE.len()..];
            }
            _ => {
                markup.push_str(&rest[..start + tag_end + 1]);
                rest = body;
            }
        }
    }

    markup.push_str(rest);
    if !markup.is_empty() {
        segments.push(Segment::Markup(markup));
    }
    segments
}

/// Token kind named by the `class` attribute of an opening tag, if any.
fn token_kind(open_tag: &str) -> Option<TokenKind> {
    let classes = attribute_value(open_tag, "class")?;
    let mut names = classes.split_whitespace();
    if names.clone().any(|c| c == TokenKind::DivineName.class()) {
        Some(TokenKind::DivineName)
    } else if names.any(|c| c == TokenKind::Pronoun.class()) {
        Some(TokenKind::Pronoun)
    } else {
        None
    }
}

/// Byte offset of the `>` closing the tag at the start of `tail`, skipping
/// any `>` inside quoted attribute values.
fn tag_end(tail: &str) -> Option<usize> {
    let mut quote = None;
    for (i, c) in tail.char_indices() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(i),
            (None, _) => {}
        }
    }
    None
}

/// Value of attribute `name` in an opening tag. Only attribute names are
/// matched, never text inside another attribute's value.
fn attribute_value<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let inner = tag.strip_prefix('<')?.trim_end_matches('>');
    let mut rest = inner.trim_start_matches(|c: char| !c.is_whitespace());
    loop {
        rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '/');
        if rest.is_empty() {
            return None;
        }
        let name_end = rest
            .find(|c: char| c == '=' || c.is_whitespace() || c == '/')
            .unwrap_or(rest.len());
        let attr = &rest[..name_end];
        rest = rest[name_end..].trim_start();

        let value = match rest.strip_prefix('=') {
            Some(after) => {
                let after = after.trim_start();
                match after.chars().next() {
                    Some(q @ ('"' | '\'')) => {
                        let body = &after[1..];
                        let end = body.find(q).unwrap_or(body.len());
                        rest = body.get(end + 1..).unwrap_or("");
                        &body[..end]
                    }
                    _ => {
                        let end = after.find(char::is_whitespace).unwrap_or(after.len());
                        rest = &after[end..];
                        &after[..end]
                    }
                }
            }
            None => "",
        };
        if attr.eq_ignore_ascii_case(name) {
            return Some(value);
        }
    }
}

/// Strip HTML tags from a string (simple angle-bracket stripping).
pub(crate) fn strip_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}

/// Decode the handful of entities that appear in verse text.
pub(crate) fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}
