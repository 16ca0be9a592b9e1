//! Longest-match Thai tokenizer.
//!
//! Scans the input left to right. At every cursor position exactly one token
//! is produced by walking the dictionary trie, interleaved with the script
//! rules below, and the cursor advances by that token's length:
//!
//! | Character at the walk position | Effect |
//! |--------------------------------|--------|
//! | open bracket `( { [`           | remembered, absorbed into the next token |
//! | close bracket, `ๆ`, `ฯ`        | ends the token *including* that character |
//! | run character (Latin, digits, whitespace, …) | ends a Thai token before it, or starts a maximal run |
//! | `<` with markup enabled        | a `<…>` tag becomes one atomic token |
//! | anything else                  | extends the trie walk |
//!
//! A dictionary word only counts as a match when the character following it
//! is not a follower glyph (a trailing vowel or tone mark), so marks are never
//! split from their base consonant.
//!
//! Tokens are zero-copy slices of the input: concatenating them gives back
//! the input exactly.
use crate::{
    trie::Trie,
    unicode::{is_clause_end, is_close_bracket, is_follower, is_open_bracket, is_run_char},
};

/// Split `input` into tokens using `trie`.
///
/// `markup` makes `<…>` tags atomic. With it disabled `<` and `>` are ordinary
/// characters.
pub fn tokenize<'a>(trie: &Trie, input: &'a str, markup: bool) -> Vec<&'a str> {
    if input.is_empty() {
        return Vec::new();
    }
    let text = CharText::new(input);
    let mut tokens = Vec::with_capacity(text.len() / 3 + 1);
    let mut i = 0;
    while i < text.len() {
        let n = scan(trie, &text.chars, i, markup);
        debug_assert!(n > 0 && i + n <= text.len());
        tokens.push(text.slice(i, i + n));
        i += n;
    }
    tokens
}

/// Number of tokens that are not blank.
#[inline]
pub fn word_count(tokens: &[&str]) -> usize {
    tokens.iter().filter(|t| !t.trim().is_empty()).count()
}

/// Join tokens with `separator` between them.
#[inline]
pub fn join(tokens: &[&str], separator: &str) -> String {
    tokens.join(separator)
}

/// Decoded view of the input: characters plus the byte offset of each one, so
/// token spans computed in characters map back to `&str` slices.
struct CharText<'a> {
    src: &'a str,
    chars: Vec<char>,
    offsets: Vec<usize>,
}

impl<'a> CharText<'a> {
    fn new(src: &'a str) -> Self {
        let (offsets, chars): (Vec<usize>, Vec<char>) = src.char_indices().unzip();
        Self {
            src,
            chars,
            offsets,
        }
    }

    #[inline(always)]
    fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline(always)]
    fn byte_offset(&self, idx: usize) -> usize {
        self.offsets.get(idx).copied().unwrap_or(self.src.len())
    }

    #[inline(always)]
    fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.src[self.byte_offset(start)..self.byte_offset(end)]
    }
}

/// True when the character after `idx` is not a follower glyph (or there is none).
#[inline(always)]
fn has_no_follower(chars: &[char], idx: usize) -> bool {
    idx + 1 >= chars.len() || !is_follower(chars[idx + 1])
}

/// Length, in characters, of the token starting at `i`. Always at least 1.
fn scan(trie: &Trie, chars: &[char], i: usize, markup: bool) -> usize {
    let len = chars.len();
    let mut node = trie.root();
    let mut longest = None;
    let mut open_bracket = false;
    let mut stepped = false;

    let mut j = i;
    while j < len {
        let c = chars[j];

        if is_open_bracket(c) {
            open_bracket = true;
            j += 1;
            continue;
        }

        let clause_end = is_clause_end(c);
        if clause_end || is_close_bracket(c) {
            if clause_end && j + 1 < len && is_close_bracket(chars[j + 1]) {
                j += 1;
            }
            return j + 1 - i;
        }

        if is_run_char(c) {
            // a Thai walk in progress is cut before the run, which is then
            // picked up by the next scan
            if stepped {
                return j - i;
            }
            j += 1;
            while j < len && is_run_char(chars[j]) {
                j += 1;
            }
            return j - i;
        }

        if markup && c == '<' {
            if stepped {
                return j - i;
            }
            return tag_end(chars, j) - i;
        }

        match node.child(c) {
            Some(child) => {
                node = child;
                stepped = true;
                // the span covers every bracket the walk passed over
                if node.is_word() && has_no_follower(chars, j) {
                    longest = Some(j + 1 - i);
                }
            }
            None => break,
        }
        j += 1;
    }

    longest.unwrap_or_else(|| fallback(chars, i, open_bracket))
}

/// End (exclusive) of the markup tag opening at `open`. A tag that meets
/// another `<` or the end of input before `>` is malformed and shrinks to the
/// lone `<`.
#[inline]
fn tag_end(chars: &[char], open: usize) -> usize {
    for (k, &c) in chars.iter().enumerate().skip(open + 1) {
        match c {
            '>' => return k + 1,
            '<' => break,
            _ => {}
        }
    }
    open + 1
}

/// Index of the last follower glyph attached to the character at `base`, or
/// `base` itself when it has none.
#[inline(always)]
fn follower_chain_end(chars: &[char], base: usize) -> usize {
    let mut last = base;
    while !has_no_follower(chars, last) {
        last += 1;
    }
    last
}

/// Token length when no dictionary word matched at `i`: the character with its
/// followers, together with a pending open bracket.
///
/// A bracket opening the token is carried in front of its base character. A
/// bracket met later in the walk extends the token by the next character,
/// which again brings its own followers along.
#[inline]
fn fallback(chars: &[char], i: usize, open_bracket: bool) -> usize {
    let len = chars.len();
    let lead = usize::from(open_bracket && is_open_bracket(chars[i]));
    if i + lead >= len {
        return 1;
    }
    let mut end = follower_chain_end(chars, i + lead);
    if open_bracket && lead == 0 && end + 1 < len {
        end = follower_chain_end(chars, end + 1);
    }
    end + 1 - i
}
