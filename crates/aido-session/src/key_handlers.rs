use aido_core::document::{atomic, read_all, DocumentSurface};
use aido_core::settings::TriggerMethod;
use aido_core::unicode::char_len;
use tracing::{debug, debug_span};

use super::types::{KeyEvent, KeyResponse, Notice};
use super::InputSession;

impl InputSession {
    /// Apply a key event to `doc` and describe what the host should show.
    pub fn handle_key(&mut self, doc: &mut dyn DocumentSurface, event: KeyEvent) -> KeyResponse {
        let _span = debug_span!("handle_key", ?event).entered();

        match event {
            KeyEvent::Text(text) => self.handle_text(doc, &text),
            KeyEvent::Backspace => self.handle_backspace(doc),
            KeyEvent::Enter => self.handle_enter(doc),
            KeyEvent::MoveCursor(delta) => self.handle_move_cursor(doc, delta),
            KeyEvent::PickSuggestion(word) => self.handle_pick(doc, &word),
            KeyEvent::InvokeTrigger => self.handle_invoke(doc),
            KeyEvent::Undo => self.handle_undo(doc),
            KeyEvent::Redo => self.handle_redo(doc),
        }
    }

    /// Pre-mutation snapshot of the whole document.
    pub(super) fn snapshot(&mut self, doc: &dyn DocumentSurface) {
        let (text, cursor) = read_all(doc);
        self.history.snapshot(&text, cursor);
    }

    fn handle_text(&mut self, doc: &mut dyn DocumentSurface, text: &str) -> KeyResponse {
        if text.is_empty() {
            return KeyResponse::keep();
        }
        self.snapshot(&*doc);
        doc.insert(text);

        for c in text.chars() {
            if c.is_whitespace() {
                self.current_word.clear();
            } else {
                self.current_word.push(c);
            }
        }

        let mut resp = self.refresh_suggestions(&*doc);
        if self.config.trigger_method == TriggerMethod::Keyboard {
            resp.dispatch = self.scan_trigger(&*doc);
        }
        resp
    }

    fn handle_backspace(&mut self, doc: &mut dyn DocumentSurface) -> KeyResponse {
        self.snapshot(&*doc);
        doc.delete_backward(1);

        if self.current_word.pop().is_none() {
            return KeyResponse::keep();
        }
        if self.current_word.is_empty() {
            self.hide_suggestions()
        } else {
            self.refresh_suggestions(&*doc)
        }
    }

    fn handle_enter(&mut self, doc: &mut dyn DocumentSurface) -> KeyResponse {
        self.snapshot(&*doc);
        doc.insert("\n");
        self.current_word.clear();
        self.hide_suggestions()
    }

    fn handle_move_cursor(&mut self, doc: &mut dyn DocumentSurface, delta: i64) -> KeyResponse {
        let cursor = doc.cursor() as i64;
        let len = cursor + char_len(&doc.text_after(usize::MAX)) as i64;
        let target = cursor.saturating_add(delta).clamp(0, len);
        doc.set_cursor(target as usize);
        self.current_word.clear();
        self.hide_suggestions()
    }

    /// Replace the partial word with `word` and a trailing space.
    fn handle_pick(&mut self, doc: &mut dyn DocumentSurface, word: &str) -> KeyResponse {
        if word.is_empty() {
            return KeyResponse::keep();
        }
        self.snapshot(&*doc);
        let partial = char_len(&self.current_word);
        atomic(doc, |d| {
            d.delete_backward(partial);
            d.insert(word);
            d.insert(" ");
        });
        self.ranking.accept(word);
        self.current_word.clear();
        self.refresh_suggestions(&*doc)
    }

    fn handle_invoke(&mut self, doc: &mut dyn DocumentSurface) -> KeyResponse {
        let mut resp = KeyResponse::keep();
        resp.dispatch = self.scan_trigger(&*doc);
        if resp.dispatch.is_none() {
            debug!("invoke: no trigger before cursor");
        }
        resp
    }

    fn handle_undo(&mut self, doc: &mut dyn DocumentSurface) -> KeyResponse {
        if !self.history.apply_undo(doc) {
            return KeyResponse::notice(Notice::NothingToUndo);
        }
        self.current_word.clear();
        self.hide_suggestions()
    }

    fn handle_redo(&mut self, doc: &mut dyn DocumentSurface) -> KeyResponse {
        if !self.history.apply_redo(doc) {
            return KeyResponse::notice(Notice::NothingToRedo);
        }
        self.current_word.clear();
        self.hide_suggestions()
    }
}
