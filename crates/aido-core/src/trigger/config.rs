use std::collections::HashSet;

use serde::Deserialize;
use tracing::warn;

use super::Preprompt;

pub const DEFAULT_PREPROMPTS_TOML: &str = include_str!("default_preprompts.toml");

#[derive(Debug, thiserror::Error)]
pub enum PrepromptConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("preprompt #{index} has an empty keyword")]
    EmptyKeyword { index: usize },
    #[error("invalid keyword '{keyword}': {reason}")]
    InvalidKeyword { keyword: String, reason: String },
}

#[derive(Deserialize)]
struct PrepromptFile {
    #[serde(default)]
    preprompt: Vec<Preprompt>,
}

/// Parse an ordered `[[preprompt]]` list.
///
/// Keywords must be non-empty, free of whitespace and must not contain
/// `marker`. File order is match order, so of two entries sharing a keyword
/// only the first is ever matched.
pub fn parse_preprompts_toml(
    toml_str: &str,
    marker: &str,
) -> Result<Vec<Preprompt>, PrepromptConfigError> {
    let file: PrepromptFile =
        toml::from_str(toml_str).map_err(|e| PrepromptConfigError::Parse(e.to_string()))?;

    let mut seen = HashSet::new();
    for (index, p) in file.preprompt.iter().enumerate() {
        if p.keyword.is_empty() {
            return Err(PrepromptConfigError::EmptyKeyword { index });
        }
        if p.keyword.chars().any(char::is_whitespace) {
            return Err(PrepromptConfigError::InvalidKeyword {
                keyword: p.keyword.clone(),
                reason: "must not contain whitespace".to_string(),
            });
        }
        if !marker.is_empty() && p.keyword.contains(marker) {
            return Err(PrepromptConfigError::InvalidKeyword {
                keyword: p.keyword.clone(),
                reason: format!("must not contain the marker '{marker}'"),
            });
        }
        if !seen.insert(p.keyword.as_str()) {
            warn!(keyword = %p.keyword, index, "duplicate preprompt keyword, earlier entry wins");
        }
    }

    Ok(file.preprompt)
}

/// Returns the embedded default preprompts TOML content.
pub fn default_preprompts_toml() -> &'static str {
    DEFAULT_PREPROMPTS_TOML
}

/// The embedded default preprompt set.
pub fn default_preprompts() -> Vec<Preprompt> {
    parse_preprompts_toml(DEFAULT_PREPROMPTS_TOML, super::DEFAULT_MARKER)
        .expect("default preprompts TOML must be valid")
}
