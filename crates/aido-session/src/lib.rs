//! Stateful input session wiring keystrokes to suggestions, trigger
//! dispatch and undo/redo.
//!
//! `InputSession` owns the editing state for one text field. Each key event
//! is applied to the host's [`DocumentSurface`] and answered with a
//! [`KeyResponse`] telling the host what to show and whether a prompt should
//! be sent. Provider replies come back through
//! [`InputSession::receive_dispatch`].

mod dispatch_handler;
mod key_handlers;
mod suggestions;
mod types;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use aido_core::dict::RankingStore;
use aido_core::history::EditHistory;
use aido_core::recent::RecentWords;
use aido_core::settings::{Settings, TriggerMethod};
use aido_core::suggest::RankingContext;
use aido_core::trigger::{Preprompt, TriggerParser};

pub use types::{DispatchOutcome, KeyEvent, KeyResponse, Notice, SuggestionAction};

use types::SessionConfig;

pub struct InputSession {
    ranking: RankingContext,
    history: EditHistory,
    parser: TriggerParser,
    preprompts: Vec<Preprompt>,
    config: SessionConfig,

    /// Chars typed since the last word break.
    current_word: String,
    /// Words currently shown in the strip.
    suggestions: Vec<String>,
}

impl InputSession {
    pub fn new(store: Arc<dyn RankingStore>, settings: &Settings, preprompts: Vec<Preprompt>) -> Self {
        Self {
            ranking: RankingContext::with_settings(store, &settings.suggestions),
            history: EditHistory::new(settings.history.undo_capacity),
            parser: TriggerParser::from_settings(&settings.trigger),
            preprompts,
            config: SessionConfig::from_settings(settings),
            current_word: String::new(),
            suggestions: Vec::new(),
        }
    }

    /// Restore a recent-words ring persisted by the host.
    pub fn with_recent(mut self, recent: RecentWords) -> Self {
        self.ranking = self.ranking.with_recent(recent);
        self
    }

    pub fn set_preprompts(&mut self, preprompts: Vec<Preprompt>) {
        self.preprompts = preprompts;
    }

    pub fn set_trigger_enabled(&mut self, enabled: bool) {
        self.config.trigger_enabled = enabled;
    }

    pub fn set_trigger_method(&mut self, method: TriggerMethod) {
        self.config.trigger_method = method;
    }

    pub fn preprompts(&self) -> &[Preprompt] {
        &self.preprompts
    }

    pub fn current_word(&self) -> &str {
        &self.current_word
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn recent(&self) -> &RecentWords {
        self.ranking.recent()
    }

    /// Forget per-field state when the host switches to another text field.
    /// The undo log belongs to the old field and is cleared too.
    pub fn reset(&mut self) {
        self.current_word.clear();
        self.suggestions.clear();
        self.history.clear();
    }
}
