//! Character trie holding the segmentation dictionary.
//!
//! The trie is built once from a word list and never mutated afterwards; a
//! dictionary change builds a fresh trie (see [`crate::dictionary::SharedDictionary`]).
//! Children are kept in a `SmallVec` sorted by character: Thai nodes past the
//! root rarely have more than a handful of children, so a binary search over
//! an inline array beats hashing.
use smallvec::SmallVec;

type Children = SmallVec<[(char, Box<TrieNode>); 4]>;

#[derive(Debug, Default, Clone)]
pub struct TrieNode {
    children: Children,
    end_of_word: bool,
}

impl TrieNode {
    #[inline(always)]
    pub fn child(&self, c: char) -> Option<&TrieNode> {
        self.children
            .binary_search_by_key(&c, |(k, _)| *k)
            .ok()
            .map(|idx| self.children[idx].1.as_ref())
    }

    /// True when the path from the root to this node spells a dictionary word.
    #[inline(always)]
    pub fn is_word(&self) -> bool {
        self.end_of_word
    }

    #[inline]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Returns the child for `c`, creating it when missing. The flag is true
    /// when a node was created.
    fn child_or_insert(&mut self, c: char) -> (&mut TrieNode, bool) {
        let (idx, created) = match self.children.binary_search_by_key(&c, |(k, _)| *k) {
            Ok(idx) => (idx, false),
            Err(idx) => {
                self.children.insert(idx, (c, Box::default()));
                (idx, true)
            }
        };
        (&mut self.children[idx].1, created)
    }
}

#[derive(Debug, Default, Clone)]
pub struct Trie {
    root: TrieNode,
    words: usize,
    nodes: usize,
}

impl Trie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a trie from `words`. Insertion order does not affect the result and
    /// duplicates are ignored.
    pub fn build<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new();
        for word in words {
            trie.insert(word.as_ref());
        }
        trie
    }

    /// Insert a single word. Empty strings are ignored.
    ///
    /// Only used while building: a published trie is shared behind an `Arc`
    /// and never mutated.
    pub fn insert(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }
        let mut node = &mut self.root;
        for c in word.chars() {
            let (next, created) = node.child_or_insert(c);
            self.nodes += created as usize;
            node = next;
        }
        if !node.end_of_word {
            node.end_of_word = true;
            self.words += 1;
        }
    }

    #[inline(always)]
    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Exact membership test.
    pub fn contains(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let mut node = &self.root;
        for c in word.chars() {
            match node.child(c) {
                Some(next) => node = next,
                None => return false,
            }
        }
        node.end_of_word
    }

    /// Number of distinct words.
    #[inline]
    pub fn len(&self) -> usize {
        self.words
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Number of nodes, root excluded.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_and_contains() {
        let trie = Trie::build(["ทดสอบ", "ทด", "ไม่"]);
        assert!(trie.contains("ทดสอบ"));
        assert!(trie.contains("ทด"));
        assert!(trie.contains("ไม่"));
        assert!(!trie.contains("ทดส"));
        assert!(!trie.contains("ไม"));
        assert!(!trie.contains(""));
        assert_eq!(trie.len(), 3);
    }

    #[test]
    fn duplicates_are_idempotent() {
        let once = Trie::build(["กา", "กิน"]);
        let twice = Trie::build(["กา", "กิน", "กา", "กิน"]);
        assert_eq!(once.len(), twice.len());
        assert_eq!(once.node_count(), twice.node_count());
    }

    #[test]
    fn insertion_order_is_irrelevant() {
        let a = Trie::build(["ข้าว", "ข้า", "ขา"]);
        let b = Trie::build(["ขา", "ข้า", "ข้าว"]);
        assert_eq!(a.node_count(), b.node_count());
        for w in ["ข้าว", "ข้า", "ขา"] {
            assert!(a.contains(w) && b.contains(w));
        }
        let ka = a.root().child('ข').unwrap();
        let kb = b.root().child('ข').unwrap();
        assert_eq!(ka.child_count(), kb.child_count());
    }

    #[test]
    fn empty_words_are_skipped() {
        let trie = Trie::build(["", "ก"]);
        assert_eq!(trie.len(), 1);
        assert!(!trie.root().is_word());
    }

    #[test]
    fn node_walk() {
        let trie = Trie::build(["กา"]);
        let k = trie.root().child('ก').unwrap();
        assert!(!k.is_word());
        let ka = k.child('า').unwrap();
        assert!(ka.is_word());
        assert!(ka.child('า').is_none());
        assert_eq!(trie.node_count(), 2);
    }
}
