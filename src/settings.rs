//! Segmenter settings.
//!
//! Settings are plain JSON, every field optional:
//!
//! ```json
//! {
//!   "dictionary_path": "assets/dictionary.txt",
//!   "word_break": "custom",
//!   "custom_marker": "|",
//!   "load_dictionary_on_start": false
//! }
//! ```
use crate::unicode::ZWSP_STR;
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Which marker is inserted between tokens when word breaking is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordBreak {
    #[default]
    ZeroWidthSpace,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub dictionary_path: PathBuf,
    pub word_break: WordBreak,
    pub custom_marker: String,
    pub load_dictionary_on_start: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dictionary_path: PathBuf::from("dictionary.txt"),
            word_break: WordBreak::ZeroWidthSpace,
            custom_marker: String::new(),
            load_dictionary_on_start: true,
        }
    }
}

impl Settings {
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Like [`Settings::load`], but a missing or broken file yields the
    /// defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!("{e}; default settings will be used");
            Self::default()
        })
    }

    /// The marker string inserted at word boundaries. A `Custom` break with an
    /// empty `custom_marker` inserts nothing.
    pub fn word_break_marker(&self) -> &str {
        match self.word_break {
            WordBreak::ZeroWidthSpace => ZWSP_STR,
            WordBreak::Custom => &self.custom_marker,
        }
    }

    pub fn with_dictionary_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dictionary_path = path.into();
        self
    }

    pub fn with_custom_marker(mut self, marker: impl Into<String>) -> Self {
        self.word_break = WordBreak::Custom;
        self.custom_marker = marker.into();
        self
    }

    pub fn with_load_on_start(mut self, on: bool) -> Self {
        self.load_dictionary_on_start = on;
        self
    }
}
