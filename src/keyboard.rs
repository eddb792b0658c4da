use std::sync::Arc;
use std::time::Duration;

use aido_core::document::DocumentSurface;
use aido_session::{DispatchOutcome, InputSession, KeyEvent, KeyResponse};
use tracing::debug;

use crate::async_worker::DispatchWorker;
use crate::config::{EngineConfig, EngineError};
use crate::provider::build_provider;

/// An [`InputSession`] paired with a background [`DispatchWorker`].
///
/// Dispatch requests raised by key events are submitted to the worker;
/// the host calls [`poll`](Self::poll) on its own thread to splice finished
/// replies into the document. Without a provider, requests are still
/// reported in the [`KeyResponse`] but nothing is sent.
pub struct Keyboard {
    session: InputSession,
    worker: Option<DispatchWorker>,
}

impl Keyboard {
    pub fn new(session: InputSession, worker: Option<DispatchWorker>) -> Self {
        Self { session, worker }
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        let session = InputSession::new(
            Arc::clone(&config.store),
            &config.settings,
            config.preprompts.clone(),
        );
        let worker = match &config.provider {
            Some(provider_config) => {
                let provider = build_provider(provider_config)?;
                let dispatch = config.settings.dispatch.clone();
                let timeout = provider_config.timeout(&dispatch);
                Some(DispatchWorker::new(provider, dispatch, timeout))
            }
            None => None,
        };
        Ok(Self::new(session, worker))
    }

    pub fn handle_key(&mut self, doc: &mut dyn DocumentSurface, event: KeyEvent) -> KeyResponse {
        let resp = self.session.handle_key(doc, event);
        if let (Some(worker), Some(request)) = (&self.worker, &resp.dispatch) {
            worker.submit(request.clone());
        }
        resp
    }

    /// Apply every reply that has arrived, without blocking.
    pub fn poll(&mut self, doc: &mut dyn DocumentSurface) -> Vec<DispatchOutcome> {
        let Some(worker) = &self.worker else {
            return Vec::new();
        };
        let mut outcomes = Vec::new();
        while let Some(reply) = worker.try_recv() {
            outcomes.push(self.session.receive_dispatch(doc, reply));
        }
        if !outcomes.is_empty() {
            debug!(count = outcomes.len(), "dispatch replies applied");
        }
        outcomes
    }

    /// Block up to `timeout` for the next reply and apply it.
    pub fn wait(
        &mut self,
        doc: &mut dyn DocumentSurface,
        timeout: Duration,
    ) -> Option<DispatchOutcome> {
        let reply = self.worker.as_ref()?.recv_timeout(timeout)?;
        Some(self.session.receive_dispatch(doc, reply))
    }

    /// Drop outstanding dispatches and per-field state, e.g. when the host
    /// focuses another text field.
    pub fn reset(&mut self) {
        if let Some(worker) = &self.worker {
            worker.cancel();
        }
        self.session.reset();
    }

    pub fn has_provider(&self) -> bool {
        self.worker.is_some()
    }

    pub fn session(&self) -> &InputSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut InputSession {
        &mut self.session
    }
}
