use super::DictSourceError;

/// Parsed word list: unigrams in file order plus word-pair counts.
#[derive(Debug, Default)]
pub struct WordList {
    pub words: Vec<(String, u32)>,
    pub bigrams: Vec<(String, String, u32)>,
}

/// Parse a TSV word list.
///
/// ```text
/// # comment
/// the\t231358
/// of the\t30324
/// ```
///
/// A line with one word before the tab is a unigram; two words separated by
/// a space form a bigram (`prev next`). File order is the rank order used to
/// break frequency ties.
pub fn parse_word_list(content: &str) -> Result<WordList, DictSourceError> {
    let mut list = WordList::default();

    for (i, raw) in content.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, freq)) = line.split_once('\t') else {
            return Err(DictSourceError::Parse {
                line: line_no,
                reason: "expected <word>\\t<frequency>".to_string(),
            });
        };
        let frequency: u32 = freq.trim().parse().map_err(|_| DictSourceError::Parse {
            line: line_no,
            reason: format!("invalid frequency '{}'", freq.trim()),
        })?;

        let mut words = key.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some(word), None, None) => list.words.push((word.to_string(), frequency)),
            (Some(prev), Some(next), None) => {
                list.bigrams
                    .push((prev.to_string(), next.to_string(), frequency));
            }
            _ => {
                return Err(DictSourceError::Parse {
                    line: line_no,
                    reason: format!("expected one or two words, got '{key}'"),
                });
            }
        }
    }

    Ok(list)
}
