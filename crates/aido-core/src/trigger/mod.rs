//! In-text trigger detection and prompt resolution.
//!
//! A trigger is a marker (default `@`) followed by a preprompt keyword and
//! free text, typed at the end of the text before the cursor:
//!
//! ```text
//! Hello @ai summarize this
//!       ^^^^^^^^^^^^^^^^^^ raw span, keyword "ai", input "summarize this"
//! ```
//!
//! Both steps are pure. A missing or incomplete trigger is `None`, never an
//! error.

mod config;

pub use config::{
    default_preprompts, default_preprompts_toml, parse_preprompts_toml, PrepromptConfigError,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::settings::TriggerSettings;
use crate::unicode::{char_len, tail};

pub const DEFAULT_MARKER: &str = "@";
pub const DEFAULT_MAX_LOOKBACK: usize = 100;
pub const DEFAULT_PLACEHOLDER: &str = "{input}";

/// User-defined prompt template selected by a trigger keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preprompt {
    pub keyword: String,
    pub template: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Preprompt {
    pub fn new(keyword: &str, template: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            template: template.to_string(),
            description: None,
        }
    }
}

/// Text from the marker (inclusive) up to the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerSpan {
    marker_len: usize,
    text: String,
}

impl TriggerSpan {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text after the marker.
    pub fn body(&self) -> &str {
        &self.text[self.marker_len..]
    }

    /// Span length in chars; the number of chars to delete when replacing it.
    pub fn char_len(&self) -> usize {
        char_len(&self.text)
    }
}

/// A span matched against a preprompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    pub preprompt: Preprompt,
    /// Everything after the keyword, trimmed.
    pub input: String,
    pub final_prompt: String,
    pub span: TriggerSpan,
}

impl ParseResult {
    pub fn span_len(&self) -> usize {
        self.span.char_len()
    }
}

/// Find the trigger span ending at the cursor.
///
/// Only the last `max_lookback` chars are scanned. The nearest marker that
/// starts a word (text start or preceded by whitespace) opens the span; a span
/// crossing a line break is rejected.
pub fn detect(text_before_cursor: &str, marker: &str, max_lookback: usize) -> Option<TriggerSpan> {
    candidates(text_before_cursor, marker, max_lookback).next()
}

/// Every span [`detect`] could open, nearest marker first.
///
/// Stops at the first line break, so all spans stay on the cursor's line.
pub fn candidates<'a>(
    text_before_cursor: &'a str,
    marker: &'a str,
    max_lookback: usize,
) -> impl Iterator<Item = TriggerSpan> + 'a {
    let window = tail(text_before_cursor, max_lookback);
    let offset = text_before_cursor.len() - window.len();

    window
        .rmatch_indices(marker)
        .filter(move |&(pos, _)| {
            if marker.is_empty() {
                return false;
            }
            let preceding = &text_before_cursor[..offset + pos];
            preceding.is_empty() || preceding.ends_with(char::is_whitespace)
        })
        .map(move |(pos, _)| &window[pos..])
        .take_while(|span| !span.contains(['\n', '\r']))
        .map(move |span| TriggerSpan {
            marker_len: marker.len(),
            text: span.to_string(),
        })
}

/// Match `span` against `preprompts` in configured order.
///
/// The keyword must follow the marker exactly (case-sensitive) and be
/// followed by whitespace or the end of the span. The first match wins.
pub fn resolve(span: &TriggerSpan, preprompts: &[Preprompt], placeholder: &str) -> Option<ParseResult> {
    let body = span.body();
    let (preprompt, rest) = preprompts.iter().find_map(|p| {
        if p.keyword.is_empty() {
            return None;
        }
        let rest = body.strip_prefix(p.keyword.as_str())?;
        (rest.is_empty() || rest.starts_with(char::is_whitespace)).then_some((p, rest))
    })?;

    let input = rest.trim();
    let final_prompt = fill_template(&preprompt.template, placeholder, input);
    debug!(keyword = %preprompt.keyword, input_chars = char_len(input), "trigger resolved");

    Some(ParseResult {
        preprompt: preprompt.clone(),
        input: input.to_string(),
        final_prompt,
        span: span.clone(),
    })
}

/// Substitute `input` for every `placeholder` in `template`. Without a
/// placeholder the input is appended after a space.
pub fn fill_template(template: &str, placeholder: &str, input: &str) -> String {
    if !placeholder.is_empty() && template.contains(placeholder) {
        return template.replace(placeholder, input);
    }
    match (template.is_empty(), input.is_empty()) {
        (_, true) => template.to_string(),
        (true, false) => input.to_string(),
        (false, false) => format!("{template} {input}"),
    }
}

/// Detection and resolution bound to one trigger configuration.
#[derive(Debug, Clone)]
pub struct TriggerParser {
    marker: String,
    max_lookback: usize,
    placeholder: String,
}

impl Default for TriggerParser {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER, DEFAULT_MAX_LOOKBACK, DEFAULT_PLACEHOLDER)
    }
}

impl TriggerParser {
    pub fn new(marker: &str, max_lookback: usize, placeholder: &str) -> Self {
        Self {
            marker: marker.to_string(),
            max_lookback,
            placeholder: placeholder.to_string(),
        }
    }

    pub fn from_settings(s: &TriggerSettings) -> Self {
        Self::new(&s.marker, s.max_lookback, &s.placeholder)
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn max_lookback(&self) -> usize {
        self.max_lookback
    }

    pub fn detect(&self, text_before_cursor: &str) -> Option<TriggerSpan> {
        detect(text_before_cursor, &self.marker, self.max_lookback)
    }

    pub fn resolve(&self, span: &TriggerSpan, preprompts: &[Preprompt]) -> Option<ParseResult> {
        resolve(span, preprompts, &self.placeholder)
    }

    /// The nearest span on the cursor's line that resolves.
    ///
    /// A marker inside the prompt text (`@ai reply to @bob`) does not hide
    /// the trigger that opened it.
    pub fn parse(&self, text_before_cursor: &str, preprompts: &[Preprompt]) -> Option<ParseResult> {
        candidates(text_before_cursor, &self.marker, self.max_lookback)
            .find_map(|span| self.resolve(&span, preprompts))
    }
}
