//! Dictionary sources and the shared, swappable dictionary handle.
//!
//! A dictionary source is plain text with one word per line. Lines are
//! trimmed, blank lines are skipped and lines starting with `/` are comments.
//! `\r\n` and lone `\r` line endings are accepted.
//!
//! [`SharedDictionary`] publishes a built [`Trie`] behind an `Arc`. Readers
//! clone the `Arc` and keep using it for the whole call, so a rebuild never
//! exposes a half-built trie: the replacement is constructed first and then
//! swapped in with a single write.
use crate::trie::Trie;
use log::{info, warn};
use parking_lot::RwLock;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("cannot read dictionary `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dictionary `{0}` contains no words")]
    Empty(String),
}

/// Words of a dictionary source, in file order.
pub fn words_from_source(content: &str) -> impl Iterator<Item = &str> {
    content
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|w| !w.is_empty() && !w.starts_with('/'))
}

/// Build a trie from dictionary source text.
pub fn trie_from_source(content: &str) -> Trie {
    Trie::build(words_from_source(content))
}

/// Read and build a dictionary file.
///
/// A file that parses to zero words is rejected with [`DictionaryError::Empty`]:
/// publishing it would make every tokenize call fall back to single characters.
pub fn trie_from_path(path: impl AsRef<Path>) -> Result<Trie, DictionaryError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let trie = trie_from_source(&content);
    if trie.is_empty() {
        return Err(DictionaryError::Empty(path.display().to_string()));
    }
    Ok(trie)
}

/// Thread-safe slot holding the currently published dictionary.
///
/// Cloning a `SharedDictionary` shares the slot.
#[derive(Debug, Clone, Default)]
pub struct SharedDictionary {
    slot: Arc<RwLock<Option<Arc<Trie>>>>,
}

impl SharedDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot that starts out with `trie` published.
    pub fn with_trie(trie: Trie) -> Self {
        let shared = Self::new();
        shared.publish(trie);
        shared
    }

    /// Snapshot of the current dictionary, `None` until one is published.
    #[inline]
    pub fn current(&self) -> Option<Arc<Trie>> {
        self.slot.read().clone()
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Publish a fully built trie, replacing any previous one. Calls already
    /// holding the old `Arc` keep it until they finish.
    pub fn publish(&self, trie: Trie) {
        if trie.is_empty() {
            warn!("publishing an empty dictionary, every token will fall back to single characters");
        }
        info!(
            "dictionary rebuilt: {} words, {} nodes",
            trie.len(),
            trie.node_count()
        );
        let trie = Arc::new(trie);
        *self.slot.write() = Some(trie);
    }

    pub fn rebuild_from_words<I, S>(&self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.publish(Trie::build(words));
    }

    pub fn rebuild_from_source(&self, content: &str) {
        self.publish(trie_from_source(content));
    }

    /// Load `path` and publish it. On error the previously published
    /// dictionary, if any, stays in place.
    pub fn rebuild_from_path(&self, path: impl AsRef<Path>) -> Result<(), DictionaryError> {
        let trie = trie_from_path(path)?;
        self.publish(trie);
        Ok(())
    }

    /// Drop the published dictionary.
    pub fn clear(&self) {
        *self.slot.write() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn source_parsing_rules() {
        let src = "  ทดสอบ  \r\n/comment\r\n\r\nไม่\rกิน\n   \n/ไม่นับ\nข้าว";
        let words: Vec<_> = words_from_source(src).collect();
        assert_eq!(words, ["ทดสอบ", "ไม่", "กิน", "ข้าว"]);
    }

    #[test]
    fn comment_only_after_trim() {
        let words: Vec<_> = words_from_source("   /x\nก/ข").collect();
        assert_eq!(words, ["ก/ข"]);
    }

    #[test]
    fn trie_from_source_builds_words() {
        let trie = trie_from_source("ทดสอบ\nทด\n");
        assert!(trie.contains("ทดสอบ"));
        assert!(trie.contains("ทด"));
        assert_eq!(trie.len(), 2);
    }

    #[test]
    fn trie_from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "// header\r\nกิน\r\nข้าว\r\n").unwrap();
        let trie = trie_from_path(file.path()).unwrap();
        assert_eq!(trie.len(), 2);
    }

    #[test]
    fn trie_from_path_errors() {
        let missing = trie_from_path("/definitely/not/here.txt");
        assert!(matches!(missing, Err(DictionaryError::Io { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "/only\n\n  \n").unwrap();
        assert!(matches!(
            trie_from_path(file.path()),
            Err(DictionaryError::Empty(_))
        ));
    }

    #[test]
    fn shared_swap_keeps_old_snapshot() {
        let shared = SharedDictionary::new();
        assert!(!shared.is_loaded());
        assert!(shared.current().is_none());

        shared.rebuild_from_words(["กิน"]);
        let before = shared.current().unwrap();
        shared.rebuild_from_words(["ข้าว"]);
        let after = shared.current().unwrap();

        assert!(before.contains("กิน") && !before.contains("ข้าว"));
        assert!(after.contains("ข้าว") && !after.contains("กิน"));
    }

    #[test]
    fn failed_rebuild_keeps_previous() {
        let shared = SharedDictionary::with_trie(Trie::build(["กิน"]));
        assert!(shared.rebuild_from_path("/no/such/dictionary").is_err());
        assert!(shared.current().unwrap().contains("กิน"));
    }

    #[test]
    fn clones_share_the_slot() {
        let a = SharedDictionary::new();
        let b = a.clone();
        a.rebuild_from_source("ทดสอบ");
        assert!(b.is_loaded());
        b.clear();
        assert!(!a.is_loaded());
    }

    #[test]
    fn concurrent_readers_during_rebuild() {
        let shared = SharedDictionary::with_trie(Trie::build(["ก"]));
        std::thread::scope(|s| {
            for _ in 0..4 {
                let reader = shared.clone();
                s.spawn(move || {
                    for _ in 0..200 {
                        let trie = reader.current().unwrap();
                        // every snapshot is complete: exactly one of the two word sets
                        assert!(trie.contains("ก") ^ trie.contains("ข"));
                    }
                });
            }
            for i in 0..50 {
                if i % 2 == 0 {
                    shared.rebuild_from_words(["ข"]);
                } else {
                    shared.rebuild_from_words(["ก"]);
                }
            }
        });
    }
}
