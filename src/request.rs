use serde::Serialize;
use std::borrow::Cow;

/// One tokenize call: the text plus how the tokens should be joined.
///
/// Defaults follow the host layer: no visible separator, word-break markers
/// inserted, markup tags atomic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizeRequest<'a> {
    pub input: Cow<'a, str>,
    pub separator: Cow<'a, str>,
    pub break_words: bool,
    pub supports_markup: bool,
}

impl<'a> TokenizeRequest<'a> {
    pub fn new(input: impl Into<Cow<'a, str>>) -> Self {
        Self {
            input: input.into(),
            separator: Cow::Borrowed(""),
            break_words: true,
            supports_markup: true,
        }
    }

    pub fn separator(mut self, separator: impl Into<Cow<'a, str>>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn break_words(mut self, on: bool) -> Self {
        self.break_words = on;
        self
    }

    pub fn supports_markup(mut self, on: bool) -> Self {
        self.supports_markup = on;
        self
    }
}

/// Joined output and the number of non-blank tokens.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TokenizeResult {
    pub text: String,
    pub word_count: usize,
}

impl TokenizeResult {
    pub fn new(text: String, word_count: usize) -> Self {
        Self { text, word_count }
    }
}
