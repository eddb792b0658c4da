use aido_core::dispatch::{apply_response, check_span, DispatchReply, DispatchRequest};
use aido_core::document::DocumentSurface;
use aido_core::unicode::preview;
use tracing::{debug, debug_span, warn};

use super::types::DispatchOutcome;
use super::InputSession;

impl InputSession {
    /// Look for a resolvable trigger ending at the cursor.
    ///
    /// Skipped entirely while triggers are disabled.
    pub(super) fn scan_trigger(&self, doc: &dyn DocumentSurface) -> Option<DispatchRequest> {
        if !self.config.trigger_enabled {
            return None;
        }
        // One extra char so a marker at the window edge sees what precedes it.
        let before = doc.text_before(self.parser.max_lookback().saturating_add(1));
        let result = self.parser.parse(&before, &self.preprompts)?;
        debug!(
            keyword = %result.preprompt.keyword,
            span = %preview(result.span.text()),
            "trigger detected"
        );
        Some(DispatchRequest {
            prompt: result.final_prompt,
            span: result.span,
            keyword: result.preprompt.keyword,
        })
    }

    /// Apply a finished dispatch to `doc`.
    ///
    /// Failures and stale replies leave the document untouched. A successful
    /// reply is bracketed by history snapshots so one undo removes it.
    pub fn receive_dispatch(
        &mut self,
        doc: &mut dyn DocumentSurface,
        reply: DispatchReply,
    ) -> DispatchOutcome {
        let _span = debug_span!("receive_dispatch", keyword = %reply.request.keyword).entered();

        let text = match reply.result {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "dispatch failed, document untouched");
                return DispatchOutcome::Failed(e);
            }
        };
        let span = &reply.request.span;
        if let Err(stale) = check_span(&*doc, span) {
            return DispatchOutcome::Stale(stale);
        }

        self.snapshot(&*doc);
        if let Err(stale) = apply_response(doc, span, &text) {
            return DispatchOutcome::Stale(stale);
        }
        self.snapshot(&*doc);

        self.current_word.clear();
        self.suggestions.clear();
        DispatchOutcome::Applied
    }
}
