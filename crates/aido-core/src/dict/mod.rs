//! Word-frequency dictionary answering completion and next-word queries.
//!
//! `RankingStore` is the read-only contract the suggestion engine ranks
//! against. `WordDictionary` implements it with a sorted prefix index and a
//! successor table built from a TSV word list.

mod source;
mod word_dict;

pub use source::{parse_word_list, WordList};
pub use word_dict::WordDictionary;

#[derive(Debug, thiserror::Error)]
pub enum DictSourceError {
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

pub trait RankingStore: Send + Sync {
    /// Words starting with `prefix` (case-insensitive), most frequent first.
    /// Equal frequencies keep the store's rank order.
    fn completions(&self, prefix: &str, limit: usize) -> Vec<String>;

    /// Words that most frequently follow `word`, most frequent first.
    fn successors(&self, word: &str, limit: usize) -> Vec<String>;

    fn contains(&self, word: &str) -> bool;
}
