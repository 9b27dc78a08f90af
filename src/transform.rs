//! Display transforms applied after a chapter is rendered.
//!
//! Three independent passes driven by [`DisplaySettings`]:
//!
//! 1. **Divine name**: every `yhwh` token shows the configured rendering.
//! 2. **Pronoun case**: every `pro` token starts with `H` when emphasis is on,
//!    `h` otherwise.
//! 3. **Image**: the illustrative image switches between two variants.
//!
//! Each pass only rewrites token text, so re-running with the same settings
//! leaves the content unchanged.

use crate::config::{DisplayConfig, ImagesConfig};
use crate::content::{ChapterView, TokenKind};

/// Current state of the display toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySettings {
    /// Free-text rendering of the divine name.
    pub divine_name: String,
    pub pronoun_emphasis: bool,
    pub alternate_image: bool,
}

impl From<&DisplayConfig> for DisplaySettings {
    fn from(config: &DisplayConfig) -> Self {
        Self {
            divine_name: config.divine_name.clone(),
            pronoun_emphasis: config.pronoun_emphasis,
            alternate_image: config.alternate_image,
        }
    }
}

pub fn apply_divine_name(view: &mut ChapterView, rendering: &str) {
    for token in view.tokens_mut(TokenKind::DivineName) {
        if token.text != rendering {
            token.text = rendering.to_string();
        }
    }
}

pub fn apply_pronoun_case(view: &mut ChapterView, emphasis: bool) {
    let lead = if emphasis { 'H' } else { 'h' };
    for token in view.tokens_mut(TokenKind::Pronoun) {
        let rest = token.text.chars().skip(1);
        token.text = std::iter::once(lead).chain(rest).collect();
    }
}

/// Image source for the current toggle state.
pub fn image_source(images: &ImagesConfig, alternate: bool) -> &str {
    if alternate { &images.alternate } else { &images.default }
}

/// Run the text passes over rendered content.
pub fn apply(view: &mut ChapterView, settings: &DisplaySettings) {
    apply_divine_name(view, &settings.divine_name);
    apply_pronoun_case(view, settings.pronoun_emphasis);
}

/// The illustrative image. Hidden until its current source has loaded; once
/// revealed it stays visible across later swaps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageState {
    pub src: Option<String>,
    pub visible: bool,
    pending: bool,
}

impl ImageState {
    /// Point the image at `src`. Setting the same source again is a no-op.
    pub fn set_source(&mut self, src: &str) {
        if self.src.as_deref() != Some(src) {
            self.src = Some(src.to_string());
            self.pending = true;
        }
    }

    /// The current source finished loading.
    pub fn loaded(&mut self) {
        if self.src.is_some() {
            self.pending = false;
            self.visible = true;
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
