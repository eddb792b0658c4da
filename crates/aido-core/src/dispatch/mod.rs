//! Prompt dispatch contract: provider seam, language rewrite and the
//! stale-edit-guarded splice of a reply into the document.
//!
//! The network call itself lives behind [`Provider`]; running it off the
//! keystroke thread is the host's job (see the engine's dispatch worker).


use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::document::{atomic, DocumentSurface};
use crate::settings::DispatchSettings;
use crate::trigger::TriggerSpan;
use crate::unicode::preview;

/// What happens to an outstanding call when a newer one is submitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupersedePolicy {
    /// Every reply is delivered; the stale-edit check rejects outdated ones.
    #[default]
    LastReplyWins,
    /// A newer request (or an explicit cancel) discards the older reply.
    CancelOnSupersede,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("provider returned HTTP {status}: {message}")]
    Provider { status: u16, message: String },
    #[error("request timed out")]
    Timeout,
    #[error("provider returned an empty reply")]
    EmptyResponse,
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
    #[error("provider configuration: {0}")]
    Config(String),
    #[error("request superseded")]
    Cancelled,
}

/// The text before the cursor no longer ends with the span captured at
/// detection time, so the reply was not applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stale edit: expected '{expected}' before the cursor, found '{found}'")]
pub struct StaleEdit {
    pub expected: String,
    pub found: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Google Gemini `generateContent`.
    Gemini,
    /// Any OpenAI-compatible chat completions endpoint.
    OpenAi,
}

/// Credentials and model for one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub api_key: String,
    pub model: String,
    /// Base URL override; `None` uses the provider's public endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Per-call override of `dispatch.timeout_ms`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl ProviderConfig {
    pub fn new(kind: ProviderKind, api_key: &str, model: &str) -> Self {
        Self {
            kind,
            api_key: api_key.to_string(),
            model: model.to_string(),
            endpoint: None,
            timeout_ms: None,
        }
    }

    pub fn validate(&self) -> Result<(), DispatchError> {
        if self.api_key.trim().is_empty() {
            return Err(DispatchError::Config("missing API key".to_string()));
        }
        if self.model.trim().is_empty() {
            return Err(DispatchError::Config("missing model".to_string()));
        }
        Ok(())
    }

    /// Effective call timeout: the config override, else the settings value.
    pub fn timeout(&self, settings: &DispatchSettings) -> Duration {
        self.timeout_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| settings.timeout())
    }
}

/// A remote language model.
pub trait Provider: Send + Sync {
    /// Send `prompt` and return the raw reply text. Implementations must give
    /// up after `timeout` with [`DispatchError::Timeout`].
    fn complete(&self, prompt: &str, timeout: Duration) -> Result<String, DispatchError>;
}

/// Prefix `prompt` with a reply-language request when the preference is set
/// and differs from the document language.
///
/// A blank preference or `None` (any case) leaves the prompt unchanged.
pub fn apply_language_preference(
    prompt: &str,
    response_language: &str,
    document_language: &str,
) -> String {
    let lang = response_language.trim();
    if lang.is_empty()
        || lang.eq_ignore_ascii_case("none")
        || lang.eq_ignore_ascii_case(document_language.trim())
    {
        return prompt.to_string();
    }
    format!("(Please reply in {lang}) {prompt}")
}

/// Run one prompt through `provider`: language rewrite, call, reply check.
///
/// Blocks for up to the effective timeout; call it off the keystroke thread.
pub fn dispatch(
    provider: &dyn Provider,
    prompt: &str,
    settings: &DispatchSettings,
    timeout: Duration,
) -> Result<String, DispatchError> {
    let prompt = apply_language_preference(
        prompt,
        &settings.response_language,
        &settings.document_language,
    );
    let started = Instant::now();
    let reply = provider.complete(&prompt, timeout);
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match reply {
        Ok(text) => {
            let text = text.trim();
            if text.is_empty() {
                warn!(elapsed_ms, "dispatch returned an empty reply");
                return Err(DispatchError::EmptyResponse);
            }
            debug!(elapsed_ms, reply = %preview(text), "dispatch succeeded");
            Ok(text.to_string())
        }
        Err(e) => {
            warn!(elapsed_ms, error = %e, "dispatch failed");
            Err(e)
        }
    }
}

/// A resolved trigger waiting for its reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRequest {
    /// Final prompt before the language rewrite.
    pub prompt: String,
    /// Span to replace with the reply.
    pub span: TriggerSpan,
    pub keyword: String,
}

/// A finished call, handed back to the thread that owns the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReply {
    pub request: DispatchRequest,
    pub result: Result<String, DispatchError>,
}

/// Check that the text before the cursor still ends with `span`.
pub fn check_span<D>(doc: &D, span: &TriggerSpan) -> Result<(), StaleEdit>
where
    D: DocumentSurface + ?Sized,
{
    let found = doc.text_before(span.char_len());
    if found == span.text() {
        return Ok(());
    }
    let err = StaleEdit {
        expected: preview(span.text()),
        found: preview(&found),
    };
    warn!(%err, "reply discarded");
    Err(err)
}

/// Replace `span` (which must end at the cursor) with `response`.
///
/// The deletion and insertion form one atomic group. When the text before
/// the cursor no longer ends with the span, nothing is touched.
pub fn apply_response<D>(doc: &mut D, span: &TriggerSpan, response: &str) -> Result<(), StaleEdit>
where
    D: DocumentSurface + ?Sized,
{
    check_span(doc, span)?;
    let len = span.char_len();
    atomic(doc, |d| {
        d.delete_backward(len);
        d.insert(response);
    });
    debug!(span_chars = len, reply = %preview(response), "reply applied");
    Ok(())
}
