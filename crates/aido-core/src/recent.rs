//! Recently accepted words, most recent first.
//!
//! Only a ranking signal for completions; never treated as a dictionary.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

pub const DEFAULT_RECENT_CAPACITY: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentWords {
    words: VecDeque<String>,
    capacity: usize,
}

impl Default for RecentWords {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_CAPACITY)
    }
}

impl RecentWords {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            words: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Move `word` (lowercased) to the front, evicting from the tail when
    /// over capacity. Blank words are ignored.
    pub fn touch(&mut self, word: &str) {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return;
        }
        if let Some(pos) = self.words.iter().position(|w| *w == word) {
            self.words.remove(pos);
        }
        self.words.push_front(word);
        self.words.truncate(self.capacity);
    }

    /// Up to `limit` words starting with `prefix`, excluding `prefix` itself.
    /// `prefix` is expected lowercased.
    pub fn matching(&self, prefix: &str, limit: usize) -> Vec<&str> {
        self.words
            .iter()
            .filter(|w| w.starts_with(prefix) && w.as_str() != prefix)
            .take(limit)
            .map(String::as_str)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }
}
