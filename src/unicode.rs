//! Character classification for Thai segmentation.
//!
//! Every predicate here is a pure function of a single `char`. The segmenter
//! calls them once or twice per scanned position, so they are all tiny,
//! `#[inline(always)]` and (where the set is a contiguous range) `const`.
use phf::{Set, phf_set};

/// Zero-width space, the default word-break marker.
pub const ZWSP: char = '\u{200B}';
pub const ZWSP_STR: &str = "\u{200B}";

/// Thai repetition mark `ๆ` (U+0E46).
pub const MAI_YAMOK: char = '\u{0E46}';

/// Thai abbreviation / ellipsis mark `ฯ` (U+0E2F).
pub const PAIYANNOI: char = '\u{0E2F}';

/// Thai lakkhangyao `ๅ` (U+0E45).
pub const LAKKHANGYAO: char = '\u{0E45}';

/// Punctuation and control characters that are never looked up in the
/// dictionary and are grouped into runs instead.
static RUN_PUNCTUATION: Set<char> = phf_set! {
    '~',
    '\u{0E46}', // ๆ
    '\u{0E2F}', // ฯ
    '\u{201C}', // “
    '\u{201D}', // ”
    ',',
    '.',
    ' ',
    '\n',
    '\r',
    '\t',
    '\\',
};

#[inline(always)]
pub const fn is_open_bracket(c: char) -> bool {
    matches!(c, '(' | '{' | '[')
}

#[inline(always)]
pub const fn is_close_bracket(c: char) -> bool {
    matches!(c, ')' | '}' | ']')
}

/// `ๆ` and `ฯ` always terminate the token they appear in.
#[inline(always)]
pub const fn is_clause_end(c: char) -> bool {
    matches!(c, MAI_YAMOK | PAIYANNOI)
}

/// Thai digits `๐`..=`๙`.
#[inline(always)]
pub const fn is_thai_digit(c: char) -> bool {
    matches!(c as u32, 0x0E50..=0x0E59)
}

/// Combining marks and trailing vowels that must stay attached to the
/// character before them.
#[inline(always)]
pub const fn is_follower(c: char) -> bool {
    matches!(c,
        '\u{0E30}'..='\u{0E39}' | // sara a .. sara uu
        '\u{0E47}'..='\u{0E4C}' | // maitaikhu, tone marks, thanthakhat
        MAI_YAMOK | PAIYANNOI | LAKKHANGYAO
    )
}

/// Characters that are grouped into non-dictionary runs: ASCII letters and
/// digits, Thai digits, whitespace, a handful of punctuation marks and every
/// close bracket.
#[inline(always)]
pub fn is_run_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || is_thai_digit(c)
        || is_close_bracket(c)
        || RUN_PUNCTUATION.contains(&c)
}

/// Thai block U+0E00..=U+0E7F.
#[inline(always)]
pub const fn is_thai(c: char) -> bool {
    matches!(c as u32, 0x0E00..=0x0E7F)
}
