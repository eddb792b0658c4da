//! Engine settings loaded from TOML.
//!
//! - `parse_settings_toml(toml_content)` parses and validates a custom file
//! - `Settings::default()` parses the embedded `default_settings.toml`
//! - Settings are passed to the components that need them; there is no
//!   process-wide instance.

use serde::Deserialize;

use crate::dispatch::SupersedePolicy;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub suggestions: SuggestionSettings,
    pub history: HistorySettings,
    pub trigger: TriggerSettings,
    pub dispatch: DispatchSettings,
}

impl Default for Settings {
    fn default() -> Self {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("default settings TOML must be valid")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionSettings {
    pub max_results: usize,
    pub max_recent_matches: usize,
    pub recent_capacity: usize,
    pub context_window: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistorySettings {
    pub undo_capacity: usize,
}

/// How the trigger pipeline is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerMethod {
    /// Scan for a trigger after every text change.
    Keyboard,
    /// Scan only when the host sends an explicit invoke event.
    Button,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TriggerSettings {
    pub enabled: bool,
    pub method: TriggerMethod,
    pub marker: String,
    pub max_lookback: usize,
    pub placeholder: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DispatchSettings {
    pub timeout_ms: u64,
    pub response_language: String,
    pub document_language: String,
    pub supersede: SupersedePolicy,
}

impl DispatchSettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }
    macro_rules! check_non_blank {
        ($section:ident . $field:ident) => {
            if s.$section.$field.trim().is_empty() {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        };
    }

    check_positive!(suggestions.max_results);
    check_positive!(suggestions.recent_capacity);
    check_positive!(suggestions.context_window);
    check_positive!(history.undo_capacity);
    check_positive!(trigger.max_lookback);
    check_positive!(dispatch.timeout_ms);

    check_non_blank!(trigger.marker);
    check_non_blank!(trigger.placeholder);

    if s.trigger.marker.chars().any(char::is_whitespace) {
        return Err(SettingsError::InvalidValue {
            field: "trigger.marker".to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }
    if s.trigger.marker.chars().count() >= s.trigger.max_lookback {
        return Err(SettingsError::InvalidValue {
            field: "trigger.max_lookback".to_string(),
            reason: "must be longer than the marker".to_string(),
        });
    }
    if s.suggestions.max_recent_matches > s.suggestions.max_results {
        return Err(SettingsError::InvalidValue {
            field: "suggestions.max_recent_matches".to_string(),
            reason: "must not exceed suggestions.max_results".to_string(),
        });
    }

    Ok(())
}
