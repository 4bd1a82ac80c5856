//! Text utilities used by the chunking walk.
//!
//! All sizing is in Unicode scalar values, never bytes, so overlap tails
//! cannot land inside a multi-byte sequence.

/// Character count of `text`.
pub(super) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Split `text` into paragraphs: maximal newline-separated runs, dropped if
/// empty after trimming, each with a normalized `"\n\n"` suffix.
pub(super) fn split_paragraphs(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("{p}\n\n"))
        .collect()
}

/// The last `n` characters of `text`, or all of it when shorter.
pub(super) fn tail_chars(text: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match text.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}
