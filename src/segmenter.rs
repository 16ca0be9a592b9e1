use crate::{
    dictionary::{DictionaryError, SharedDictionary},
    request::{TokenizeRequest, TokenizeResult},
    settings::{Settings, SettingsError},
    tokenizer::{join, tokenize, word_count},
    trie::Trie,
};
use log::{debug, error};
use memchr::memmem;
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};
use thiserror::Error;

/// Why a tokenize call produced no result. Both are expected states rather
/// than bugs, so callers usually fall back to the untouched input.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("no dictionary is loaded")]
    DictionaryUnavailable,

    #[error("separator and word-break marker are both empty")]
    EmptySeparator,
}

#[derive(Debug, Error)]
pub enum SegmenterError {
    #[error("dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("tokenize error: {0}")]
    Tokenize(#[from] TokenizeError),
}

/// Thai word segmenter bound to a swappable dictionary.
///
/// Cheap to share: every call takes a snapshot of the current dictionary, so
/// any number of threads can tokenize while another one rebuilds.
#[derive(Debug, Clone)]
pub struct Segmenter {
    dictionary: SharedDictionary,
    settings: Settings,
    // set after a failed lazy load has been logged at error level
    load_failure_reported: Arc<AtomicBool>,
}

impl Segmenter {
    pub fn builder() -> SegmenterBuilder {
        SegmenterBuilder::default()
    }

    /// Segmenter over an already built trie, with default settings.
    pub fn new(trie: Trie) -> Self {
        Self {
            dictionary: SharedDictionary::with_trie(trie),
            settings: Settings::default(),
            load_failure_reported: Arc::default(),
        }
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The dictionary slot. Clone it to share the dictionary with other
    /// segmenters.
    #[inline]
    pub fn dictionary(&self) -> &SharedDictionary {
        &self.dictionary
    }

    #[inline]
    pub fn is_dictionary_loaded(&self) -> bool {
        self.dictionary.is_loaded()
    }

    #[inline]
    pub fn word_break_marker(&self) -> &str {
        self.settings.word_break_marker()
    }

    /// Tokenize and join a request.
    ///
    /// Existing word-break markers are removed from the input first; when
    /// `break_words` is set the marker is appended to the separator. If no
    /// dictionary has been published yet, one load from
    /// `settings.dictionary_path` is attempted. The load is retried on every
    /// call until it succeeds; only the first failure is logged as an error,
    /// later ones at debug level.
    pub fn try_tokenize(&self, request: &TokenizeRequest<'_>) -> Result<TokenizeResult, TokenizeError> {
        let trie = self
            .ensure_dictionary()
            .ok_or(TokenizeError::DictionaryUnavailable)?;

        let marker = self.word_break_marker();
        let separator: Cow<'_, str> = if request.break_words && !marker.is_empty() {
            Cow::Owned(format!("{}{marker}", request.separator))
        } else {
            Cow::Borrowed(request.separator.as_ref())
        };
        if separator.is_empty() {
            return Err(TokenizeError::EmptySeparator);
        }

        let input = strip_marker(&request.input, marker);
        let tokens = tokenize(&trie, &input, request.supports_markup);
        let count = word_count(&tokens);
        debug!(
            "tokenized {} chars into {} tokens ({count} words)",
            input.chars().count(),
            tokens.len()
        );
        Ok(TokenizeResult::new(join(&tokens, &separator), count))
    }

    /// [`Segmenter::try_tokenize`] with default request options.
    pub fn tokenize_text(&self, input: &str) -> Result<TokenizeResult, TokenizeError> {
        self.try_tokenize(&TokenizeRequest::new(input))
    }

    /// Joined output, or the input untouched when tokenizing is not possible.
    pub fn safe_tokenize<'r>(&self, request: &'r TokenizeRequest<'_>) -> Cow<'r, str> {
        match self.try_tokenize(request) {
            Ok(result) => Cow::Owned(result.text),
            Err(e) => {
                debug!("returning input unchanged: {e}");
                Cow::Borrowed(request.input.as_ref())
            }
        }
    }

    /// Raw token slices of `input`, without marker handling or joining.
    pub fn tokens<'a>(&self, input: &'a str, markup: bool) -> Result<Vec<&'a str>, TokenizeError> {
        let trie = self
            .ensure_dictionary()
            .ok_or(TokenizeError::DictionaryUnavailable)?;
        Ok(tokenize(&trie, input, markup))
    }

    pub fn rebuild_from_words<I, S>(&self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.dictionary.rebuild_from_words(words);
    }

    pub fn rebuild_from_source(&self, content: &str) {
        self.dictionary.rebuild_from_source(content);
    }

    pub fn rebuild_from_path(&self, path: impl AsRef<Path>) -> Result<(), DictionaryError> {
        self.dictionary.rebuild_from_path(path)
    }

    /// Reload the dictionary from `settings.dictionary_path`.
    pub fn rebuild_from_settings(&self) -> Result<(), DictionaryError> {
        self.dictionary.rebuild_from_path(&self.settings.dictionary_path)
    }

    fn ensure_dictionary(&self) -> Option<Arc<Trie>> {
        if let Some(trie) = self.dictionary.current() {
            return Some(trie);
        }
        if let Err(e) = self.rebuild_from_settings() {
            if self.load_failure_reported.swap(true, Ordering::Relaxed) {
                debug!("dictionary still unavailable: {e}");
            } else {
                error!("{e}");
            }
            return None;
        }
        self.load_failure_reported.store(false, Ordering::Relaxed);
        self.dictionary.current()
    }
}

/// Remove every occurrence of `marker` from `text`, borrowing when there is
/// none.
fn strip_marker<'a>(text: &'a str, marker: &str) -> Cow<'a, str> {
    if marker.is_empty() || memmem::find(text.as_bytes(), marker.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace(marker, ""))
}

#[derive(Debug, Default)]
pub struct SegmenterBuilder {
    settings: Option<Settings>,
    settings_file: Option<PathBuf>,
    dictionary: Option<SharedDictionary>,
    trie: Option<Trie>,
}

impl SegmenterBuilder {
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Read settings from a JSON file at build time. Ignored when
    /// [`SegmenterBuilder::settings`] is also given.
    pub fn settings_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_file = Some(path.into());
        self
    }

    /// Share an existing dictionary slot.
    pub fn dictionary(mut self, dictionary: SharedDictionary) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    pub fn words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.trie = Some(Trie::build(words));
        self
    }

    pub fn source(mut self, content: &str) -> Self {
        self.trie = Some(crate::dictionary::trie_from_source(content));
        self
    }

    /// Build the segmenter.
    ///
    /// Without explicit words or an already loaded shared dictionary, the
    /// dictionary file named in the settings is loaded now when
    /// `load_dictionary_on_start` is set, and lazily on first use otherwise.
    pub fn build(self) -> Result<Segmenter, SegmenterError> {
        let settings = match (self.settings, self.settings_file) {
            (Some(settings), _) => settings,
            (None, Some(path)) => Settings::load(path)?,
            (None, None) => Settings::default(),
        };
        let dictionary = self.dictionary.unwrap_or_default();

        if let Some(trie) = self.trie {
            dictionary.publish(trie);
        } else if !dictionary.is_loaded() && settings.load_dictionary_on_start {
            dictionary.rebuild_from_path(&settings.dictionary_path)?;
        }

        Ok(Segmenter {
            dictionary,
            settings,
            load_failure_reported: Arc::default(),
        })
    }
}
