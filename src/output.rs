//! CLI output formatting.
//!
//! Each view has a `format_*` function returning lines, for testability, and
//! the binary prints them. Format functions are pure.
//!
//! ```text
//! 001 Genesis (50 chapters)
//! 002 Exodus (40 chapters)
//! ```
//!
//! ```text
//! Psalm 23
//!
//!   1 The LORD is my shepherd; I shall not want.
//!   2 He maketh me to lie down in green pastures.
//! ```

use crate::check::CheckReport;
use crate::reader::Output;
use crate::types::Selector;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: u32, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

pub fn format_books(books: &Selector) -> Vec<String> {
    books
        .options
        .iter()
        .enumerate()
        .map(|(i, o)| match o.chapters {
            Some(n) => format!("{} {} ({})", format_index(i + 1), o.label, plural(n, "chapter")),
            None => format!("{} {}", format_index(i + 1), o.label),
        })
        .collect()
}

pub fn format_chapters(book: &str, chapters: &Selector) -> Vec<String> {
    let state = if chapters.enabled { "enabled" } else { "disabled" };
    vec![
        format!("{book} ({state})"),
        format!("    {}", chapters.values().join(" ")),
    ]
}

/// The output region as text. Verse numbers are right-aligned to the widest
/// one in the chapter.
pub fn format_output(output: &Output) -> Vec<String> {
    match output {
        Output::Empty => Vec::new(),
        Output::Notice(message) => vec![message.clone()],
        Output::Chapter(view) => {
            let width = view
                .paragraphs
                .iter()
                .map(|p| p.verse.to_string().len())
                .max()
                .unwrap_or(1);
            let mut lines = vec![view.heading.clone(), String::new()];
            lines.extend(view.paragraphs.iter().map(|p| {
                format!("  {:>width$} {}", p.verse, p.plain_text().trim())
            }));
            lines
        }
    }
}

pub fn format_check_report(report: &CheckReport) -> Vec<String> {
    let mut lines = vec![format!(
        "{} books, {} of {} chapter documents checked",
        report.books, report.checked, report.expected
    )];

    let mut section = |title: &str, entries: Vec<String>| {
        if !entries.is_empty() {
            lines.push(format!("{title} ({})", entries.len()));
            lines.extend(entries.into_iter().map(|e| format!("    {e}")));
        }
    };
    section("Books without chapter count", report.uncounted_books.clone());
    section(
        "Invalid",
        report
            .invalid
            .iter()
            .map(|(path, reason)| format!("{path}: {reason}"))
            .collect(),
    );
    section("Missing", report.missing.clone());
    section("Unexpected", report.unexpected.clone());
    lines
}
