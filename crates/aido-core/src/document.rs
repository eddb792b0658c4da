//! The live text buffer being edited, seen through a narrow read/write
//! contract.
//!
//! Hosts implement [`DocumentSurface`] over whatever editor connection they
//! have. All counts and offsets are in chars; implementations clamp instead of
//! failing when asked to read or delete past either end.

use crate::unicode::{byte_offset, char_len, head, tail};

pub trait DocumentSurface {
    /// Up to `n` chars immediately before the cursor.
    fn text_before(&self, n: usize) -> String;
    /// Up to `n` chars immediately after the cursor.
    fn text_after(&self, n: usize) -> String;
    /// Cursor position as a char offset from the start of the document.
    fn cursor(&self) -> usize;
    fn delete_backward(&mut self, count: usize);
    fn delete_forward(&mut self, count: usize);
    /// Insert at the cursor and leave the cursor after the inserted text.
    fn insert(&mut self, text: &str);
    fn set_cursor(&mut self, offset: usize);
    fn begin_atomic(&mut self);
    fn end_atomic(&mut self);
}

/// Run `f` inside one `begin_atomic`/`end_atomic` group.
pub fn atomic<D, R>(doc: &mut D, f: impl FnOnce(&mut D) -> R) -> R
where
    D: DocumentSurface + ?Sized,
{
    doc.begin_atomic();
    let r = f(doc);
    doc.end_atomic();
    r
}

/// Full document text and cursor, read through the surface contract.
pub fn read_all<D: DocumentSurface + ?Sized>(doc: &D) -> (String, usize) {
    let before = doc.text_before(usize::MAX);
    let after = doc.text_after(usize::MAX);
    let cursor = char_len(&before);
    (before + &after, cursor)
}

/// In-memory document, used by tests, the CLI and hosts without a native
/// buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    text: String,
    /// Char offset.
    cursor: usize,
    atomic_depth: usize,
    /// Completed outermost atomic groups.
    atomic_groups: usize,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document holding `text` with the cursor at the end.
    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: char_len(text),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn atomic_groups(&self) -> usize {
        self.atomic_groups
    }

    pub fn in_atomic(&self) -> bool {
        self.atomic_depth > 0
    }

    fn cursor_byte(&self) -> usize {
        byte_offset(&self.text, self.cursor)
    }
}

impl DocumentSurface for MemoryDocument {
    fn text_before(&self, n: usize) -> String {
        tail(&self.text[..self.cursor_byte()], n).to_string()
    }

    fn text_after(&self, n: usize) -> String {
        head(&self.text[self.cursor_byte()..], n).to_string()
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn delete_backward(&mut self, count: usize) {
        let count = count.min(self.cursor);
        let start = byte_offset(&self.text, self.cursor - count);
        let end = self.cursor_byte();
        self.text.replace_range(start..end, "");
        self.cursor -= count;
    }

    fn delete_forward(&mut self, count: usize) {
        let start = self.cursor_byte();
        let end = byte_offset(&self.text, self.cursor.saturating_add(count));
        self.text.replace_range(start..end, "");
    }

    fn insert(&mut self, text: &str) {
        let at = self.cursor_byte();
        self.text.insert_str(at, text);
        self.cursor += char_len(text);
    }

    fn set_cursor(&mut self, offset: usize) {
        self.cursor = offset.min(char_len(&self.text));
    }

    fn begin_atomic(&mut self) {
        self.atomic_depth += 1;
    }

    fn end_atomic(&mut self) {
        if self.atomic_depth == 0 {
            return;
        }
        self.atomic_depth -= 1;
        if self.atomic_depth == 0 {
            self.atomic_groups += 1;
        }
    }
}
