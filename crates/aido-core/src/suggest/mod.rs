//! Ranked word completions and next-word predictions.
//!
//! Ranking state (the dictionary and the recent-words ring) lives in an
//! explicitly owned [`RankingContext`]; the query functions are pure over it.

#[cfg(test)]
mod tests;

use std::collections::HashSet;
use std::sync::Arc;

use tracing::trace;

use crate::dict::RankingStore;
use crate::recent::RecentWords;
use crate::settings::SuggestionSettings;

pub const DEFAULT_MAX_RESULTS: usize = 6;
pub const DEFAULT_MAX_RECENT_MATCHES: usize = 2;

/// Words that most frequently follow `last_word`, up to `limit`.
pub fn predict_next(store: &dyn RankingStore, last_word: &str, limit: usize) -> Vec<String> {
    let word = strip_punctuation(last_word);
    if word.is_empty() || limit == 0 {
        return Vec::new();
    }
    store.successors(word, limit)
}

/// Completions for a partially typed word.
///
/// Up to `max_recent` ring matches come first (most recent first), then
/// dictionary completions by frequency. Case-insensitive, deduplicated,
/// capped at `limit`.
pub fn completions(
    store: &dyn RankingStore,
    prefix: &str,
    recent: &RecentWords,
    max_recent: usize,
    limit: usize,
) -> Vec<String> {
    let prefix = prefix.to_lowercase();
    if prefix.is_empty() || limit == 0 {
        return Vec::new();
    }

    let recent_matches = recent.matching(&prefix, max_recent.min(limit));
    let dict_matches = store.completions(&prefix, limit);

    let mut seen = HashSet::new();
    let mut result = Vec::with_capacity(limit);
    let merged = recent_matches
        .into_iter()
        .map(str::to_string)
        .chain(dict_matches);
    for word in merged {
        if result.len() == limit {
            break;
        }
        if seen.insert(word.clone()) {
            result.push(word);
        }
    }
    result
}

/// The last completed word in `text_before_cursor`, without surrounding
/// punctuation. `None` when there is no word.
pub fn last_word(text_before_cursor: &str) -> Option<&str> {
    let word = strip_punctuation(text_before_cursor.split_whitespace().next_back()?);
    (!word.is_empty()).then_some(word)
}

fn strip_punctuation(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
}

/// Dictionary plus recency state, owned by one session.
pub struct RankingContext {
    store: Arc<dyn RankingStore>,
    recent: RecentWords,
    max_results: usize,
    max_recent_matches: usize,
}

impl RankingContext {
    pub fn new(store: Arc<dyn RankingStore>) -> Self {
        Self {
            store,
            recent: RecentWords::default(),
            max_results: DEFAULT_MAX_RESULTS,
            max_recent_matches: DEFAULT_MAX_RECENT_MATCHES,
        }
    }

    pub fn with_settings(store: Arc<dyn RankingStore>, s: &SuggestionSettings) -> Self {
        Self {
            store,
            recent: RecentWords::new(s.recent_capacity),
            max_results: s.max_results,
            max_recent_matches: s.max_recent_matches,
        }
    }

    /// Replace the ring, e.g. with one restored by the host.
    pub fn with_recent(mut self, recent: RecentWords) -> Self {
        self.recent = recent;
        self
    }

    pub fn store(&self) -> &dyn RankingStore {
        self.store.as_ref()
    }

    pub fn recent(&self) -> &RecentWords {
        &self.recent
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn predict_next(&self, last_word: &str) -> Vec<String> {
        predict_next(self.store(), last_word, self.max_results)
    }

    pub fn completions(&self, prefix: &str) -> Vec<String> {
        completions(
            self.store(),
            prefix,
            &self.recent,
            self.max_recent_matches,
            self.max_results,
        )
    }

    /// Record an accepted suggestion. The only ranking-state mutation.
    pub fn accept(&mut self, word: &str) {
        trace!(%word, "suggestion accepted");
        self.recent.touch(word);
    }
}
