//! Shared selector types.
//!
//! Both the book and chapter selectors are modelled the same way: an ordered
//! option list, the currently selected value and an enabled flag. Option
//! values are strings, as in an HTML `<select>`, so an error placeholder can
//! carry an empty value.

use serde::Serialize;

/// Label shown by the single placeholder option of a failed selector.
pub const ERROR_LABEL: &str = "Error";

/// One entry of a selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    /// Chapter count attached to book options (`data-chapters`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapters: Option<u32>,
}

impl SelectOption {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
            chapters: None,
        }
    }

    /// The placeholder option a selector shows after a failed load.
    pub fn error() -> Self {
        Self {
            value: String::new(),
            label: ERROR_LABEL.to_string(),
            chapters: None,
        }
    }
}

/// A `<select>`-like control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selector {
    pub options: Vec<SelectOption>,
    /// Currently selected value. Empty when nothing is selectable.
    pub selected: String,
    pub enabled: bool,
}

impl Default for Selector {
    fn default() -> Self {
        Self {
            options: Vec::new(),
            selected: String::new(),
            enabled: true,
        }
    }
}

impl Selector {
    /// Replace all options, selecting the first one.
    pub fn replace_options(&mut self, options: Vec<SelectOption>) {
        self.selected = options.first().map(|o| o.value.clone()).unwrap_or_default();
        self.options = options;
    }

    /// Replace all options with the single error placeholder.
    pub fn show_error(&mut self) {
        self.replace_options(vec![SelectOption::error()]);
    }

    /// Select `value` if one of the options carries it. Returns whether the
    /// selection changed to it.
    pub fn select(&mut self, value: &str) -> bool {
        if self.options.iter().any(|o| o.value == value) {
            self.selected = value.to_string();
            true
        } else {
            false
        }
    }

    pub fn selected_option(&self) -> Option<&SelectOption> {
        self.options.iter().find(|o| o.value == self.selected)
    }

    /// True when the selector holds only the error placeholder.
    pub fn is_error(&self) -> bool {
        matches!(self.options.as_slice(), [only] if only.value.is_empty() && only.label == ERROR_LABEL)
    }

    pub fn values(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.value.as_str()).collect()
    }
}
