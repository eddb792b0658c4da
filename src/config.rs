//! File loaders for the engine's resources.
//!
//! A config directory may hold any of:
//!
//! | file              | contents                            |
//! |-------------------|-------------------------------------|
//! | `settings.toml`   | engine settings                     |
//! | `preprompts.toml` | `[[preprompt]]` list                |
//! | `words.tsv`       | word list (`word<TAB>freq`, bigrams)|
//! | `provider.toml`   | provider kind, key, model           |
//!
//! Missing files fall back to the embedded defaults; a missing
//! `provider.toml` means no dispatch provider.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use aido_core::dict::{DictSourceError, RankingStore, WordDictionary};
use aido_core::dispatch::{DispatchError, ProviderConfig};
use aido_core::recent::RecentWords;
use aido_core::settings::{parse_settings_toml, Settings, SettingsError};
use aido_core::trigger::{
    default_preprompts, parse_preprompts_toml, Preprompt, PrepromptConfigError,
};
use tracing::info;

pub const SETTINGS_FILE: &str = "settings.toml";
pub const PREPROMPTS_FILE: &str = "preprompts.toml";
pub const WORDS_FILE: &str = "words.tsv";
pub const PROVIDER_FILE: &str = "provider.toml";

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("{path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("preprompts: {0}")]
    Preprompts(#[from] PrepromptConfigError),
    #[error("word list: {0}")]
    WordList(#[from] DictSourceError),
    #[error("provider config: {0}")]
    ProviderToml(String),
    #[error("recent words: {0}")]
    Recent(String),
    #[error(transparent)]
    Provider(#[from] DispatchError),
}

fn read(path: &Path) -> Result<String, EngineError> {
    fs::read_to_string(path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_settings(path: &Path) -> Result<Settings, EngineError> {
    Ok(parse_settings_toml(&read(path)?)?)
}

/// Keywords are validated against `marker` so a keyword can never contain it.
pub fn load_preprompts(path: &Path, marker: &str) -> Result<Vec<Preprompt>, EngineError> {
    Ok(parse_preprompts_toml(&read(path)?, marker)?)
}

pub fn load_dictionary(path: &Path) -> Result<WordDictionary, EngineError> {
    Ok(WordDictionary::from_tsv(&read(path)?)?)
}

pub fn parse_provider_toml(content: &str) -> Result<ProviderConfig, EngineError> {
    let config: ProviderConfig =
        toml::from_str(content).map_err(|e| EngineError::ProviderToml(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

pub fn load_provider_config(path: &Path) -> Result<ProviderConfig, EngineError> {
    parse_provider_toml(&read(path)?)
}

/// Read a ring saved by [`save_recent`]. A missing file is an empty ring.
pub fn load_recent(path: &Path, capacity: usize) -> Result<RecentWords, EngineError> {
    if !path.exists() {
        return Ok(RecentWords::new(capacity));
    }
    serde_json::from_str(&read(path)?).map_err(|e| EngineError::Recent(e.to_string()))
}

pub fn save_recent(path: &Path, recent: &RecentWords) -> Result<(), EngineError> {
    let json = serde_json::to_string(recent).map_err(|e| EngineError::Recent(e.to_string()))?;
    fs::write(path, json).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Everything needed to build a [`Keyboard`](crate::keyboard::Keyboard).
#[derive(Clone)]
pub struct EngineConfig {
    pub settings: Settings,
    pub preprompts: Vec<Preprompt>,
    pub store: Arc<dyn RankingStore>,
    pub provider: Option<ProviderConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            preprompts: default_preprompts(),
            store: Arc::new(WordDictionary::builtin()),
            provider: None,
        }
    }
}

impl EngineConfig {
    /// Load from `dir`, using embedded defaults for absent files.
    pub fn load_dir(dir: &Path) -> Result<Self, EngineError> {
        let mut config = Self::default();

        let path = dir.join(SETTINGS_FILE);
        if path.exists() {
            config.settings = load_settings(&path)?;
        }
        let path = dir.join(PREPROMPTS_FILE);
        if path.exists() {
            config.preprompts = load_preprompts(&path, &config.settings.trigger.marker)?;
        }
        let path = dir.join(WORDS_FILE);
        if path.exists() {
            config.store = Arc::new(load_dictionary(&path)?);
        }
        let path = dir.join(PROVIDER_FILE);
        if path.exists() {
            config.provider = Some(load_provider_config(&path)?);
        }

        info!(
            dir = %dir.display(),
            preprompts = config.preprompts.len(),
            provider = config.provider.is_some(),
            "engine config loaded"
        );
        Ok(config)
    }
}
