//! HTML rendering of the reader.
//!
//! Produces one complete page from the current [`Reader`] state: the control
//! bar (book, chapter, divine name, two toggles, load button), the output
//! region and the illustrative image. Element ids and classes are the ones the
//! stylesheet and any client script key on:
//!
//! | Element | Selector |
//! |---------|----------|
//! | Book selector (options carry `data-chapters`) | `#book` |
//! | Chapter selector | `#chapter` |
//! | Divine-name control | `#tetra` |
//! | Pronoun toggle | `#pronouns` |
//! | Image toggle | `#latinamode` |
//! | Load button | `#load-button` |
//! | Output region | `.output` |
//! | Verse number | `.verse-num` |
//! | Image (hidden until loaded) | `#image` |
//!
//! Uses [maud](https://maud.lambda.xyz/); everything is escaped except verse
//! markup, which is trusted content and emitted verbatim.

use crate::content::{ChapterView, Segment};
use crate::reader::{Output, Reader};
use crate::source::Source;
use crate::types::Selector;
use maud::{DOCTYPE, Markup, PreEscaped, html};

pub const CSS: &str = include_str!("../static/style.css");

const PAGE_TITLE: &str = "Scripture Reader";

/// Render the whole page for the reader's current state.
pub fn render_page<S: Source>(reader: &Reader<S>) -> Markup {
    let title = match reader.output() {
        Output::Chapter(view) => format!("{} · {PAGE_TITLE}", view.heading),
        _ => PAGE_TITLE.to_string(),
    };
    let image = reader.image();

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (render_controls(reader))
                main {
                    div.output {
                        (render_output(reader.output()))
                    }
                }
                img id="image" class=[(!image.visible).then_some("hidden")]
                    src=[image.src.as_deref()] alt=""
                    onload="this.classList.remove('hidden')";
            }
        }
    }
}

fn render_controls<S: Source>(reader: &Reader<S>) -> Markup {
    let display = &reader.display;
    let mut choices = reader.divine_name_choices.clone();
    if !choices.contains(&display.divine_name) {
        choices.push(display.divine_name.clone());
    }

    html! {
        header.controls {
            label for="book" { "Book" }
            (render_selector("book", &reader.books))
            label for="chapter" { "Chapter" }
            (render_selector("chapter", &reader.chapters))
            label for="tetra" { "Divine name" }
            select id="tetra" {
                @for choice in &choices {
                    option value=(choice) selected[*choice == display.divine_name] { (choice) }
                }
            }
            label {
                input type="checkbox" id="pronouns" checked[display.pronoun_emphasis];
                " Capitalize pronouns"
            }
            label {
                input type="checkbox" id="latinamode" checked[display.alternate_image];
                " Alternate image"
            }
            button type="button" id="load-button" { "Load" }
        }
    }
}

pub fn render_selector(id: &str, selector: &Selector) -> Markup {
    html! {
        select id=(id) disabled[!selector.enabled] {
            @for entry in &selector.options {
                option value=(entry.value)
                    data-chapters=[entry.chapters]
                    selected[entry.value == selector.selected] {
                    (entry.label)
                }
            }
        }
    }
}

/// Contents of the output region.
pub fn render_output(output: &Output) -> Markup {
    html! {
        @match output {
            Output::Empty => {}
            Output::Notice(message) => { (message) }
            Output::Chapter(view) => { (render_chapter(view)) }
        }
    }
}

fn render_chapter(view: &ChapterView) -> Markup {
    html! {
        h3 { (view.heading) }
        @for paragraph in &view.paragraphs {
            p {
                span.verse-num { (paragraph.verse) }
                " "
                @for segment in &paragraph.segments {
                    @match segment {
                        Segment::Markup(markup) => { (PreEscaped(markup)) }
                        Segment::Token(token) => {
                            (PreEscaped(&token.open_tag))
                            (token.text)
                            (PreEscaped("</span>"))
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReaderConfig;
    use crate::source::tests::MockSource;

    fn reader() -> Reader<MockSource> {
        let source = MockSource::default()
            .with(
                "data/chapters.json",
                r#"{"order":["Genesis","Obadiah"],"chapters":{"Genesis":2,"Obadiah":1}}"#,
            )
            .with(
                "data/Genesis/1.json",
                r#"{"verses":[
                    {"book_name":"Genesis","chapter":1,"verse":1,"text":"the <span class=\"yhwh\">LORD</span> &amp; <i>earth</i> <"},
                    {"book_name":"Genesis","chapter":1,"verse":2,"text":"<span class=\"pro\">he</span> said"}
                ]}"#,
            )
            .with(
                "data/Obadiah/1.json",
                r#"{"verses":[{"book_name":"Obadiah","chapter":1,"verse":1,"text":"The vision"}]}"#,
            );
        let mut reader = Reader::new(source, &ReaderConfig::default());
        reader.start();
        reader
    }

    #[test]
    fn page_has_all_controls() {
        let html = render_page(&reader()).into_string();
        for id in ["book", "chapter", "tetra", "pronouns", "latinamode", "load-button", "image"] {
            assert!(html.contains(&format!(r#"id="{id}""#)), "missing #{id}");
        }
        assert!(html.contains(r#"class="output""#));
    }

    #[test]
    fn book_options_carry_chapter_counts() {
        let html = render_selector("book", &reader().books).into_string();
        assert!(html.contains(r#"<option value="Genesis" data-chapters="2" selected>Genesis</option>"#));
        assert!(html.contains(r#"<option value="Obadiah" data-chapters="1">Obadiah</option>"#));
    }

    #[test]
    fn single_chapter_selector_is_disabled() {
        let mut r = reader();
        r.select_book("Obadiah");
        let html = render_selector("chapter", &r.chapters).into_string();
        assert!(html.starts_with(r#"<select id="chapter" disabled>"#));
    }

    #[test]
    fn verse_markup_passes_through() {
        let html = render_output(reader().output()).into_string();
        assert!(html.starts_with("<h3>Genesis 1</h3>"));
        assert!(html.contains(r#"<p><span class="verse-num">1</span> the <span class="yhwh">LORD</span> &amp; <i>earth</i> <</p>"#));
    }

    #[test]
    fn token_text_is_escaped() {
        let mut r = reader();
        r.set_divine_name("<b>Name</b>");
        let html = render_output(r.output()).into_string();
        assert!(html.contains(r#"<span class="yhwh">&lt;b&gt;Name&lt;/b&gt;</span>"#));
    }

    #[test]
    fn pronoun_toggle_reflected() {
        let mut r = reader();
        r.set_pronoun_emphasis(true);
        let html = render_page(&r).into_string();
        assert!(html.contains(r#"<span class="pro">He</span> said"#));
        assert!(html.contains(r#"<input type="checkbox" id="pronouns" checked>"#));
    }

    #[test]
    fn custom_divine_name_is_offered() {
        let mut r = reader();
        r.set_divine_name("Adonai");
        let html = render_page(&r).into_string();
        assert!(html.contains(r#"<option value="Adonai" selected>Adonai</option>"#));
    }

    #[test]
    fn image_hidden_until_loaded() {
        let mut r = reader();
        let html = render_page(&r).into_string();
        assert!(html.contains(r#"<img id="image" class="hidden" src="images/temp.jpg""#));

        r.image_loaded();
        let html = render_page(&r).into_string();
        assert!(html.contains(r#"<img id="image" src="images/temp.jpg""#));
    }

    #[test]
    fn notice_is_plain_text() {
        let mut r = reader();
        r.select_chapter("2");
        let html = render_output(r.output()).into_string();
        assert_eq!(html, "Failed to load chapter. Please try again.");
    }
}
