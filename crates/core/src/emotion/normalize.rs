//! Text normalization feeding keyword matching.
//!
//! Pure functions, no failure modes: empty input is allowed and always yields
//! a string.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Common slang/variant spellings expanded after diacritic folding, in order.
const SLANG_EXPANSIONS: &[(&str, &str)] = &[
    ("cok", "çok"),
    ("cokuzgunum", "çok üzgünüm"),
    ("iyiyim", "iyi yim"),
];

/// Drop combining diacritical marks after canonical decomposition
/// (ö→o, ü→u, ç→c; the dotless ı has no decomposition and passes through).
pub fn strip_diacritics(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Collapse any run of 3+ identical characters to 2, so intensifier spellings
/// ("coook") still match shorter lexicon entries.
fn collapse_repeats(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev: Option<char> = None;
    let mut run = 0usize;
    for c in s.chars() {
        if prev == Some(c) {
            run += 1;
        } else {
            prev = Some(c);
            run = 1;
        }
        if run <= 2 {
            out.push(c);
        }
    }
    out
}

/// Full normalization: trim + lowercase, diacritic fold, repeat collapse,
/// slang expansion — in that order.
pub fn normalize(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let mut t = strip_diacritics(&lowered);
    t = collapse_repeats(&t);
    for (from, to) in SLANG_EXPANSIONS {
        t = t.replace(from, to);
    }
    t
}
