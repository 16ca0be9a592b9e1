//! Dictionary-driven Thai word segmentation.
//!
//! Thai is written without spaces between words. `thaiseg` splits it into
//! words by longest match against a word list, keeps combining marks attached
//! to their base characters, groups Latin text, digits and punctuation into
//! runs, and treats `<…>` markup tags as atomic. The tokens are joined back
//! with a separator and an optional invisible word-break marker so that a
//! renderer can wrap lines at word boundaries.
//!
//! ```
//! use thaiseg::{Segmenter, TokenizeRequest, Trie};
//!
//! let segmenter = Segmenter::new(Trie::build(["ฉัน", "กิน", "ข้าว"]));
//! let request = TokenizeRequest::new("ฉันกินข้าว").separator("|").break_words(false);
//! let result = segmenter.try_tokenize(&request).unwrap();
//! assert_eq!(result.text, "ฉัน|กิน|ข้าว");
//! assert_eq!(result.word_count, 3);
//! ```
pub mod dictionary;
pub mod preprocess;
pub mod request;
pub mod segmenter;
pub mod settings;
pub mod tokenizer;
pub mod trie;
pub mod unicode;

pub use dictionary::{DictionaryError, SharedDictionary};
pub use preprocess::TextPreprocessor;
pub use request::{TokenizeRequest, TokenizeResult};
pub use segmenter::{Segmenter, SegmenterBuilder, SegmenterError, TokenizeError};
pub use settings::{Settings, SettingsError, WordBreak};
pub use tokenizer::tokenize;
pub use trie::Trie;
