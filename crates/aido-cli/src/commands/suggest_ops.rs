use std::io::Write;
use std::path::Path;

use aido_core::recent::RecentWords;
use aido_core::suggest::{completions, predict_next, DEFAULT_MAX_RECENT_MATCHES};

use super::dictionary_or_builtin;
use crate::CliError;

/// Completions for `prefix`, ranking `recent` words (most recent first)
/// ahead of the dictionary.
pub fn complete(
    words: Option<&Path>,
    prefix: &str,
    recent: &[String],
    limit: usize,
    json: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let dict = dictionary_or_builtin(words)?;
    let mut ring = RecentWords::default();
    for word in recent.iter().rev() {
        ring.touch(word);
    }
    let result = completions(&dict, prefix, &ring, DEFAULT_MAX_RECENT_MATCHES, limit);
    print_words(&result, json, out)
}

pub fn predict(
    words: Option<&Path>,
    last_word: &str,
    limit: usize,
    json: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let dict = dictionary_or_builtin(words)?;
    let result = predict_next(&dict, last_word, limit);
    print_words(&result, json, out)
}

fn print_words(words: &[String], json: bool, out: &mut impl Write) -> Result<(), CliError> {
    if json {
        writeln!(out, "{}", serde_json::json!(words))?;
    } else if words.is_empty() {
        writeln!(out, "(none)")?;
    } else {
        for (i, w) in words.iter().enumerate() {
            writeln!(out, "{:>2}. {w}", i + 1)?;
        }
    }
    Ok(())
}
