//! Memoized text preprocessing for display layers.
//!
//! A display widget calls [`TextPreprocessor::preprocess`] every time its text
//! might have changed. The work is only redone when the text differs from
//! the previous call or an option changed since.
use crate::{
    request::{TokenizeRequest, TokenizeResult},
    segmenter::Segmenter,
};
use log::{debug, trace};

const FULL_LINE_HEIGHT_OPEN: &str = "<line-height=100%>";
const FULL_LINE_HEIGHT_CLOSE: &str = "</line-height>";

type TokenizedHook = Box<dyn FnMut(&TokenizeResult) + Send>;

pub struct TextPreprocessor {
    segmenter: Segmenter,
    tokenize: bool,
    separator: String,
    supports_markup: bool,
    force_full_line_height: bool,
    last_input: Option<String>,
    output: String,
    last_word_count: usize,
    rebuild_required: bool,
    on_tokenized: Option<TokenizedHook>,
}

impl TextPreprocessor {
    pub fn new(segmenter: Segmenter) -> Self {
        Self {
            segmenter,
            tokenize: true,
            separator: String::new(),
            supports_markup: true,
            force_full_line_height: false,
            last_input: None,
            output: String::new(),
            last_word_count: 0,
            rebuild_required: true,
            on_tokenized: None,
        }
    }

    /// Display string for `text`, recomputed only when needed.
    pub fn preprocess(&mut self, text: &str) -> &str {
        if !self.rebuild_required && self.last_input.as_deref() == Some(text) {
            trace!("preprocess cache hit");
            return &self.output;
        }
        self.last_input = Some(text.to_owned());
        self.rebuild_required = false;
        self.output = self.rebuild(text);
        &self.output
    }

    fn rebuild(&mut self, text: &str) -> String {
        let body = if self.tokenize {
            self.tokenized(text)
        } else {
            text.to_owned()
        };
        if self.force_full_line_height {
            format!("{FULL_LINE_HEIGHT_OPEN}{body}{FULL_LINE_HEIGHT_CLOSE}")
        } else {
            body
        }
    }

    /// Tokenized text, or `text` unchanged when the segmenter cannot run.
    fn tokenized(&mut self, text: &str) -> String {
        let result = {
            let request = TokenizeRequest::new(text)
                .separator(self.separator.as_str())
                .break_words(true)
                .supports_markup(self.supports_markup);
            self.segmenter.try_tokenize(&request)
        };
        match result {
            Ok(result) => {
                self.last_word_count = result.word_count;
                if let Some(hook) = self.on_tokenized.as_mut() {
                    hook(&result);
                }
                result.text
            }
            Err(e) => {
                debug!("preprocess passes text through: {e}");
                text.to_owned()
            }
        }
    }

    /// Force the next [`TextPreprocessor::preprocess`] to recompute, e.g.
    /// after the dictionary was rebuilt.
    pub fn notify_change(&mut self) {
        self.rebuild_required = true;
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn last_word_count(&self) -> usize {
        self.last_word_count
    }

    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    pub fn is_tokenize(&self) -> bool {
        self.tokenize
    }

    pub fn set_tokenize(&mut self, on: bool) {
        self.tokenize = on;
        self.notify_change();
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn set_separator(&mut self, separator: impl Into<String>) {
        self.separator = separator.into();
        self.notify_change();
    }

    pub fn supports_markup(&self) -> bool {
        self.supports_markup
    }

    pub fn set_supports_markup(&mut self, on: bool) {
        self.supports_markup = on;
        self.notify_change();
    }

    pub fn is_force_full_line_height(&self) -> bool {
        self.force_full_line_height
    }

    pub fn set_force_full_line_height(&mut self, on: bool) {
        self.force_full_line_height = on;
        self.notify_change();
    }

    /// Called with every freshly computed result; cache hits do not call it.
    pub fn on_tokenized(&mut self, hook: impl FnMut(&TokenizeResult) + Send + 'static) {
        self.on_tokenized = Some(Box::new(hook));
    }
}

impl std::fmt::Debug for TextPreprocessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextPreprocessor")
            .field("tokenize", &self.tokenize)
            .field("separator", &self.separator)
            .field("supports_markup", &self.supports_markup)
            .field("force_full_line_height", &self.force_full_line_height)
            .field("last_word_count", &self.last_word_count)
            .field("rebuild_required", &self.rebuild_required)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{settings::Settings, trie::Trie};
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    fn preprocessor() -> TextPreprocessor {
        let segmenter = Segmenter::builder()
            .settings(Settings::default().with_custom_marker("|"))
            .words(["ฉัน", "กิน", "ข้าว"])
            .build()
            .unwrap();
        TextPreprocessor::new(segmenter)
    }

    fn counting(p: &mut TextPreprocessor) -> Arc<AtomicUsize> {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        p.on_tokenized(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        calls
    }

    #[test]
    fn tokenizes_and_counts() {
        let mut p = preprocessor();
        assert_eq!(p.preprocess("ฉันกินข้าว"), "ฉัน|กิน|ข้าว");
        assert_eq!(p.last_word_count(), 3);
        assert_eq!(p.output(), "ฉัน|กิน|ข้าว");
    }

    #[test]
    fn same_input_is_memoized() {
        let mut p = preprocessor();
        let calls = counting(&mut p);
        p.preprocess("ฉันกิน");
        p.preprocess("ฉันกิน");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        p.preprocess("กินข้าว");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn option_change_invalidates_cache() {
        let mut p = preprocessor();
        let calls = counting(&mut p);
        p.preprocess("ฉันกิน");
        p.set_separator(" ");
        assert_eq!(p.preprocess("ฉันกิน"), "ฉัน |กิน");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        p.notify_change();
        p.preprocess("ฉันกิน");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn tokenize_can_be_disabled() {
        let mut p = preprocessor();
        p.set_tokenize(false);
        assert_eq!(p.preprocess("ฉันกิน"), "ฉันกิน");
    }

    #[test]
    fn full_line_height_wraps_output() {
        let mut p = preprocessor();
        p.set_force_full_line_height(true);
        assert_eq!(
            p.preprocess("ฉันกิน"),
            "<line-height=100%>ฉัน|กิน</line-height>"
        );
    }

    #[test]
    fn markup_flag_reaches_segmenter() {
        let mut p = preprocessor();
        assert_eq!(p.preprocess("<b>ฉัน</b>"), "<b>|ฉัน|</b>");
        p.set_supports_markup(false);
        assert!(p.preprocess("<b>ฉัน</b>").starts_with("<|b|>|ฉัน"));
    }

    #[test]
    fn failure_passes_text_through() {
        let segmenter = Segmenter::builder()
            .settings(
                Settings::default()
                    .with_dictionary_path("/no/such/dictionary.txt")
                    .with_load_on_start(false),
            )
            .build()
            .unwrap();
        let mut p = TextPreprocessor::new(segmenter);
        assert_eq!(p.preprocess("ฉันกิน"), "ฉันกิน");
        assert_eq!(p.last_word_count(), 0);
    }

    #[test]
    fn dictionary_rebuild_needs_notify() {
        let mut p = TextPreprocessor::new(Segmenter::new(Trie::build(["ทดสอบ"])));
        p.set_separator("|");
        // default settings: zero-width space follows the separator
        assert_eq!(p.preprocess("ทดสอบ"), "ทดสอบ");
        p.segmenter().rebuild_from_words(["ทด", "สอบ"]);
        assert_eq!(p.preprocess("ทดสอบ"), "ทดสอบ");
        p.notify_change();
        assert_eq!(p.preprocess("ทดสอบ"), "ทด|\u{200B}สอบ");
    }
}
