//! Character-indexed string helpers.
//!
//! Cursor offsets and span lengths are counted in `char`s throughout the
//! engine, so every slice goes through these helpers instead of byte ranges.

/// Number of chars in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of the `n`-th char, or `s.len()` when `n` is past the end.
pub fn byte_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(i, _)| i)
}

/// The last `n` chars of `s` (all of `s` when shorter).
pub fn tail(s: &str, n: usize) -> &str {
    let len = char_len(s);
    &s[byte_offset(s, len.saturating_sub(n))..]
}

/// The first `n` chars of `s` (all of `s` when shorter).
pub fn head(s: &str, n: usize) -> &str {
    &s[..byte_offset(s, n)]
}

/// Short single-line preview of document text for log messages.
pub fn preview(s: &str) -> String {
    const PREVIEW_CHARS: usize = 30;
    let flat: String = head(s, PREVIEW_CHARS)
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    if char_len(s) > PREVIEW_CHARS {
        format!("{flat}...")
    } else {
        flat
    }
}
