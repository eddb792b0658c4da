use aido_core::dispatch::{DispatchError, DispatchReply, DispatchRequest};
use aido_core::document::{DocumentSurface, MemoryDocument};
use aido_core::settings::TriggerMethod;

use super::{make_session, type_string};
use crate::{DispatchOutcome, KeyEvent};

fn last_request(responses: &[crate::KeyResponse]) -> Option<DispatchRequest> {
    responses.last().and_then(|r| r.dispatch.clone())
}

fn ok(request: DispatchRequest, text: &str) -> DispatchReply {
    DispatchReply {
        request,
        result: Ok(text.to_string()),
    }
}

#[test]
fn test_keyboard_method_requests_on_typing() {
    let mut session = make_session();
    let mut doc = MemoryDocument::new();
    let responses = type_string(&mut session, &mut doc, "Hello @ai summarize this");

    let request = last_request(&responses).unwrap();
    assert_eq!(request.prompt, "Summarize: summarize this");
    assert_eq!(request.keyword, "ai");
    assert_eq!(request.span.text(), "@ai summarize this");
}

#[test]
fn test_mention_inside_prompt_keeps_trigger() {
    let mut session = make_session();
    let mut doc = MemoryDocument::new();
    let responses = type_string(&mut session, &mut doc, "Hello @ai reply to @bob");

    let request = last_request(&responses).unwrap();
    assert_eq!(request.prompt, "Summarize: reply to @bob");
    assert_eq!(request.span.text(), "@ai reply to @bob");

    let outcome = session.receive_dispatch(&mut doc, ok(request, "Sure."));
    assert_eq!(outcome, DispatchOutcome::Applied);
    assert_eq!(doc.text(), "Hello Sure.");
}

#[test]
fn test_incomplete_keyword_requests_nothing() {
    let mut session = make_session();
    let mut doc = MemoryDocument::new();
    let responses = type_string(&mut session, &mut doc, "Hello @a");
    assert!(responses.iter().all(|r| r.dispatch.is_none()));
}

#[test]
fn test_unknown_keyword_and_email_request_nothing() {
    let mut session = make_session();
    let mut doc = MemoryDocument::new();
    let responses = type_string(&mut session, &mut doc, "@zz hi user@ai x");
    assert!(responses.iter().all(|r| r.dispatch.is_none()));
}

#[test]
fn test_reply_replaces_span() {
    let mut session = make_session();
    let mut doc = MemoryDocument::new();
    let responses = type_string(&mut session, &mut doc, "Hello @ai summarize this");
    let request = last_request(&responses).unwrap();

    let outcome = session.receive_dispatch(&mut doc, ok(request, "A summary."));
    assert_eq!(outcome, DispatchOutcome::Applied);
    assert_eq!(doc.text(), "Hello A summary.");
    assert_eq!(doc.cursor(), 16);
    assert!(session.suggestions().is_empty());
}

#[test]
fn test_one_undo_removes_reply() {
    let mut session = make_session();
    let mut doc = MemoryDocument::new();
    let responses = type_string(&mut session, &mut doc, "Hi @fix teh cat");
    let request = last_request(&responses).unwrap();
    session.receive_dispatch(&mut doc, ok(request, "The cat."));
    assert_eq!(doc.text(), "Hi The cat.");

    session.handle_key(&mut doc, KeyEvent::Undo);
    assert_eq!(doc.text(), "Hi @fix teh cat");
    session.handle_key(&mut doc, KeyEvent::Redo);
    assert_eq!(doc.text(), "Hi The cat.");
}

#[test]
fn test_stale_reply_is_discarded() {
    let mut session = make_session();
    let mut doc = MemoryDocument::new();
    let responses = type_string(&mut session, &mut doc, "@ai go");
    let request = last_request(&responses).unwrap();
    type_string(&mut session, &mut doc, " now");
    let depth = session.history().undo_len();

    let outcome = session.receive_dispatch(&mut doc, ok(request, "reply"));
    assert!(matches!(outcome, DispatchOutcome::Stale(_)));
    assert_eq!(doc.text(), "@ai go now");
    assert_eq!(session.history().undo_len(), depth);
}

#[test]
fn test_older_reply_rejected_after_newer_keystrokes() {
    let mut session = make_session();
    let mut doc = MemoryDocument::new();
    let responses = type_string(&mut session, &mut doc, "@ai summarize");
    let early = responses[4].dispatch.clone().unwrap();
    assert_eq!(early.span.text(), "@ai s");
    let latest = last_request(&responses).unwrap();

    assert!(matches!(
        session.receive_dispatch(&mut doc, ok(early, "old")),
        DispatchOutcome::Stale(_)
    ));
    assert_eq!(
        session.receive_dispatch(&mut doc, ok(latest, "new")),
        DispatchOutcome::Applied
    );
    assert_eq!(doc.text(), "new");
}

#[test]
fn test_failed_dispatch_leaves_document_identical() {
    let mut session = make_session();
    let mut doc = MemoryDocument::new();
    let responses = type_string(&mut session, &mut doc, "Hello @ai summarize this");
    let request = last_request(&responses).unwrap();
    let before = doc.text().to_string();
    let depth = session.history().undo_len();

    let outcome = session.receive_dispatch(
        &mut doc,
        DispatchReply {
            request,
            result: Err(DispatchError::Timeout),
        },
    );
    assert_eq!(outcome, DispatchOutcome::Failed(DispatchError::Timeout));
    assert_eq!(doc.text(), before);
    assert_eq!(doc.atomic_groups(), 0);
    assert_eq!(session.history().undo_len(), depth);
}

#[test]
fn test_disabled_service_skips_triggers() {
    let mut session = make_session();
    session.set_trigger_enabled(false);
    let mut doc = MemoryDocument::new();
    let responses = type_string(&mut session, &mut doc, "@ai hello");
    assert!(responses.iter().all(|r| r.dispatch.is_none()));
    let resp = session.handle_key(&mut doc, KeyEvent::InvokeTrigger);
    assert!(resp.dispatch.is_none());
}

#[test]
fn test_button_method_scans_only_on_invoke() {
    let mut session = make_session();
    session.set_trigger_method(TriggerMethod::Button);
    let mut doc = MemoryDocument::new();
    let responses = type_string(&mut session, &mut doc, "@ai hello");
    assert!(responses.iter().all(|r| r.dispatch.is_none()));

    let resp = session.handle_key(&mut doc, KeyEvent::InvokeTrigger);
    assert_eq!(resp.dispatch.unwrap().prompt, "Summarize: hello");
    assert_eq!(doc.text(), "@ai hello");
}

#[test]
fn test_marker_at_lookback_edge_needs_boundary() {
    let mut session = make_session();
    // 100-char window starts exactly at the marker, which follows "x".
    let tail = format!("@ai {}", "y".repeat(96));
    let mut doc = MemoryDocument::with_text(&format!("x{tail}"));
    let resp = session.handle_key(&mut doc, KeyEvent::InvokeTrigger);
    assert!(resp.dispatch.is_none());

    let mut doc = MemoryDocument::with_text(&format!(" {tail}"));
    let resp = session.handle_key(&mut doc, KeyEvent::InvokeTrigger);
    assert!(resp.dispatch.is_some());
}

#[test]
fn test_set_preprompts_takes_effect() {
    let mut session = make_session();
    session.set_preprompts(vec![aido_core::trigger::Preprompt::new("tr", "Translate: {input}")]);
    let mut doc = MemoryDocument::with_text("@tr hola");
    let resp = session.handle_key(&mut doc, KeyEvent::InvokeTrigger);
    assert_eq!(resp.dispatch.unwrap().prompt, "Translate: hola");
    assert_eq!(session.preprompts().len(), 1);
}
