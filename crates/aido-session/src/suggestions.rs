use aido_core::document::DocumentSurface;
use aido_core::suggest::last_word;
use tracing::trace;

use super::types::{KeyResponse, SuggestionAction};
use super::InputSession;

impl InputSession {
    /// Recompute the strip: completions while a word is in progress,
    /// otherwise predictions for the word before the cursor.
    pub(super) fn refresh_suggestions(&mut self, doc: &dyn DocumentSurface) -> KeyResponse {
        let words = if self.current_word.is_empty() {
            let before = doc.text_before(self.config.context_window);
            match last_word(&before) {
                Some(w) => self.ranking.predict_next(w),
                None => Vec::new(),
            }
        } else {
            self.ranking.completions(&self.current_word)
        };
        trace!(word = %self.current_word, count = words.len(), "suggestions");
        self.show_suggestions(words)
    }

    /// `Show` for a non-empty list, `Hide` otherwise.
    pub(super) fn show_suggestions(&mut self, words: Vec<String>) -> KeyResponse {
        let mut resp = KeyResponse::keep();
        if words.is_empty() {
            self.suggestions.clear();
            resp.suggestions = SuggestionAction::Hide;
        } else {
            self.suggestions = words.clone();
            resp.suggestions = SuggestionAction::Show { words };
        }
        resp
    }

    pub(super) fn hide_suggestions(&mut self) -> KeyResponse {
        self.suggestions.clear();
        KeyResponse::hide()
    }
}
