//! Writing-assistant keyboard engine.
//!
//! Word suggestions, in-text `@keyword` prompts sent to a language model,
//! and an undo log that works regardless of the host editor.
//!
//! - [`aido_core`]: pure building blocks (dictionary, trigger parser,
//!   history, dispatch contract)
//! - [`aido_session`]: the per-field state machine
//! - this crate: HTTP providers, the background dispatch worker and the
//!   [`Keyboard`] facade a host embeds

pub mod async_worker;
pub mod config;
pub mod keyboard;
pub mod provider;
pub mod trace_init;

pub use aido_core;
pub use aido_session;

pub use async_worker::DispatchWorker;
pub use config::{EngineConfig, EngineError};
pub use keyboard::Keyboard;
