pub mod config_ops;
pub mod dispatch_ops;
pub mod suggest_ops;
pub mod trigger_ops;

use std::path::Path;

use aido_core::dict::WordDictionary;
use aido_core::settings::Settings;
use aido_core::trigger::{default_preprompts, Preprompt};
use aido_engine::config;

use crate::CliError;

fn settings_or_default(path: Option<&Path>) -> Result<Settings, CliError> {
    match path {
        Some(p) => Ok(config::load_settings(p)?),
        None => Ok(Settings::default()),
    }
}

fn preprompts_or_default(path: Option<&Path>, marker: &str) -> Result<Vec<Preprompt>, CliError> {
    match path {
        Some(p) => Ok(config::load_preprompts(p, marker)?),
        None => Ok(default_preprompts()),
    }
}

fn dictionary_or_builtin(path: Option<&Path>) -> Result<WordDictionary, CliError> {
    match path {
        Some(p) => Ok(config::load_dictionary(p)?),
        None => Ok(WordDictionary::builtin()),
    }
}
