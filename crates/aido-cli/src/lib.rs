//! `aidotool` command implementations.
//!
//! Commands write their report to a caller-supplied writer and return
//! errors instead of exiting, so the binary and the tests share them.

pub mod commands;

use aido_core::dispatch::{DispatchError, StaleEdit};
use aido_engine::EngineError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),
    #[error(transparent)]
    Stale(#[from] StaleEdit),
    #[error("no trigger before the end of '{0}'")]
    NoTrigger(String),
    #[error("output: {0}")]
    Output(#[from] std::io::Error),
}
