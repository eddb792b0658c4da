use std::collections::{BTreeMap, HashMap};

use super::source::{parse_word_list, WordList};
use super::{DictSourceError, RankingStore};

const BUILTIN_WORDS: &str = include_str!("default_words.tsv");

struct WordEntry {
    word: String,
    frequency: u32,
}

/// In-memory word dictionary.
///
/// Words are stored lowercased. Entry index doubles as rank: it is the order
/// in which a word first appeared, used to break frequency ties.
pub struct WordDictionary {
    entries: Vec<WordEntry>,
    /// lowercase word → entry index, ordered for prefix range scans.
    index: BTreeMap<String, usize>,
    /// lowercase prev word → [(entry index, count)], sorted best first.
    successors: HashMap<String, Vec<(usize, u32)>>,
}

impl WordDictionary {
    /// Build from unigram frequencies and `(prev, next, count)` pairs.
    ///
    /// Repeated words keep their first rank and the highest frequency seen.
    /// Bigram words missing from the unigram list are added with frequency 0.
    pub fn new(words: Vec<(String, u32)>, bigrams: Vec<(String, String, u32)>) -> Self {
        let mut dict = Self {
            entries: Vec::with_capacity(words.len()),
            index: BTreeMap::new(),
            successors: HashMap::new(),
        };

        for (word, frequency) in words {
            let id = dict.intern(&word);
            let entry = &mut dict.entries[id];
            entry.frequency = entry.frequency.max(frequency);
        }

        for (prev, next, count) in bigrams {
            let next_id = dict.intern(&next);
            let list = dict.successors.entry(prev.to_lowercase()).or_default();
            match list.iter_mut().find(|(id, _)| *id == next_id) {
                Some((_, c)) => *c = c.saturating_add(count),
                None => list.push((next_id, count)),
            }
        }

        for list in dict.successors.values_mut() {
            // Stable: equal counts stay in rank order.
            list.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        }

        dict
    }

    pub fn from_word_list(list: WordList) -> Self {
        Self::new(list.words, list.bigrams)
    }

    /// Parse and build from TSV content (see [`parse_word_list`]).
    pub fn from_tsv(content: &str) -> Result<Self, DictSourceError> {
        parse_word_list(content).map(Self::from_word_list)
    }

    /// Small embedded English word list.
    pub fn builtin() -> Self {
        Self::from_tsv(BUILTIN_WORDS).expect("builtin word list must be valid")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn frequency(&self, word: &str) -> Option<u32> {
        self.index
            .get(&word.to_lowercase())
            .map(|&id| self.entries[id].frequency)
    }

    fn intern(&mut self, word: &str) -> usize {
        let key = word.to_lowercase();
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = self.entries.len();
        self.entries.push(WordEntry {
            word: key.clone(),
            frequency: 0,
        });
        self.index.insert(key, id);
        id
    }
}

impl RankingStore for WordDictionary {
    fn completions(&self, prefix: &str, limit: usize) -> Vec<String> {
        let prefix = prefix.to_lowercase();
        if prefix.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut ids: Vec<usize> = self
            .index
            .range(prefix.clone()..)
            .take_while(|(word, _)| word.starts_with(&prefix))
            .map(|(_, &id)| id)
            .collect();

        ids.sort_by(|&a, &b| {
            self.entries[b]
                .frequency
                .cmp(&self.entries[a].frequency)
                .then(a.cmp(&b))
        });
        ids.truncate(limit);
        ids.into_iter()
            .map(|id| self.entries[id].word.clone())
            .collect()
    }

    fn successors(&self, word: &str, limit: usize) -> Vec<String> {
        self.successors
            .get(&word.to_lowercase())
            .map(|list| {
                list.iter()
                    .take(limit)
                    .map(|&(id, _)| self.entries[id].word.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn contains(&self, word: &str) -> bool {
        self.index.contains_key(&word.to_lowercase())
    }
}
