//! Undo/redo log of whole-document snapshots, independent of the host
//! editor's own undo support.
//!
//! Snapshots are taken before every visible mutation that is not itself an
//! undo or redo. Restoring one replaces the entire document through the
//! [`DocumentSurface`] contract.


use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::{atomic, read_all, DocumentSurface};
use crate::unicode::{char_len, preview};

pub const DEFAULT_UNDO_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub text: String,
    /// Char offset.
    pub cursor: usize,
}

impl DocumentSnapshot {
    pub fn new(text: &str, cursor: usize) -> Self {
        Self {
            text: text.to_string(),
            cursor,
        }
    }

    /// Cursor clamped to the text length.
    pub fn clamped_cursor(&self) -> usize {
        self.cursor.min(char_len(&self.text))
    }
}

/// Re-entrancy guard: snapshots are ignored while history is being applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HistoryState {
    #[default]
    Idle,
    ApplyingHistory,
}

#[derive(Debug, Clone)]
pub struct EditHistory {
    /// Oldest first; the back is the top.
    undo: VecDeque<DocumentSnapshot>,
    redo: Vec<DocumentSnapshot>,
    capacity: usize,
    state: HistoryState,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_CAPACITY)
    }
}

impl EditHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            undo: VecDeque::with_capacity(capacity),
            redo: Vec::new(),
            capacity,
            state: HistoryState::Idle,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn state(&self) -> HistoryState {
        self.state
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    /// Record the document state. Returns whether a snapshot was pushed.
    ///
    /// No-op while applying history or when `text` equals the undo top.
    /// A push clears the redo stack and evicts the oldest entry over
    /// capacity.
    pub fn snapshot(&mut self, text: &str, cursor: usize) -> bool {
        if self.state == HistoryState::ApplyingHistory {
            return false;
        }
        if self.undo.back().is_some_and(|top| top.text == text) {
            return false;
        }
        push_bounded(&mut self.undo, DocumentSnapshot::new(text, cursor), self.capacity);
        self.redo.clear();
        debug!(
            text = %preview(text),
            cursor,
            depth = self.undo.len(),
            "history snapshot"
        );
        true
    }

    /// Step back from `current`. `None` when there is nothing to undo.
    ///
    /// Entries equal to the live text are dropped first; `current` moves to
    /// the redo stack.
    pub fn undo(&mut self, current: DocumentSnapshot) -> Option<DocumentSnapshot> {
        self.state = HistoryState::ApplyingHistory;
        let target = self.pop_undo(current);
        self.state = HistoryState::Idle;
        target
    }

    /// Step forward from `current`. `None` when there is nothing to redo.
    pub fn redo(&mut self, current: DocumentSnapshot) -> Option<DocumentSnapshot> {
        self.state = HistoryState::ApplyingHistory;
        let target = self.pop_redo(current);
        self.state = HistoryState::Idle;
        target
    }

    /// Undo on a live document. Returns whether anything was restored.
    pub fn apply_undo<D: DocumentSurface + ?Sized>(&mut self, doc: &mut D) -> bool {
        self.apply(doc, Self::pop_undo)
    }

    /// Redo on a live document. Returns whether anything was restored.
    pub fn apply_redo<D: DocumentSurface + ?Sized>(&mut self, doc: &mut D) -> bool {
        self.apply(doc, Self::pop_redo)
    }

    fn apply<D: DocumentSurface + ?Sized>(
        &mut self,
        doc: &mut D,
        pop: fn(&mut Self, DocumentSnapshot) -> Option<DocumentSnapshot>,
    ) -> bool {
        self.state = HistoryState::ApplyingHistory;
        let (text, cursor) = read_all(doc);
        let restored = match pop(self, DocumentSnapshot { text, cursor }) {
            Some(target) => {
                atomic(doc, |d| replace_document(d, &target));
                true
            }
            None => false,
        };
        self.state = HistoryState::Idle;
        restored
    }

    fn pop_undo(&mut self, current: DocumentSnapshot) -> Option<DocumentSnapshot> {
        while self.undo.back().is_some_and(|top| top.text == current.text) {
            self.undo.pop_back();
        }
        let target = self.undo.pop_back()?;
        self.redo.push(current);
        debug!(text = %preview(&target.text), depth = self.undo.len(), "undo");
        Some(target)
    }

    fn pop_redo(&mut self, current: DocumentSnapshot) -> Option<DocumentSnapshot> {
        while self.redo.last().is_some_and(|top| top.text == current.text) {
            self.redo.pop();
        }
        let target = self.redo.pop()?;
        push_bounded(&mut self.undo, current, self.capacity);
        debug!(text = %preview(&target.text), depth = self.redo.len(), "redo");
        Some(target)
    }
}

fn push_bounded(stack: &mut VecDeque<DocumentSnapshot>, snap: DocumentSnapshot, capacity: usize) {
    stack.push_back(snap);
    if stack.len() > capacity {
        stack.pop_front();
    }
}

/// Replace the whole document with `snap` and place the cursor.
fn replace_document<D: DocumentSurface + ?Sized>(doc: &mut D, snap: &DocumentSnapshot) {
    let before = char_len(&doc.text_before(usize::MAX));
    let after = char_len(&doc.text_after(usize::MAX));
    doc.delete_backward(before);
    doc.delete_forward(after);
    doc.insert(&snap.text);
    doc.set_cursor(snap.clamped_cursor());
}
