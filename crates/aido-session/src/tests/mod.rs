mod basic;
mod dispatch;
mod history;

use std::sync::Arc;

use aido_core::dict::WordDictionary;
use aido_core::document::MemoryDocument;
use aido_core::settings::Settings;
use aido_core::trigger::Preprompt;

use super::{InputSession, KeyEvent, KeyResponse};

pub(super) fn make_test_dict() -> Arc<WordDictionary> {
    Arc::new(WordDictionary::new(
        vec![
            ("can".to_string(), 900),
            ("cape".to_string(), 700),
            ("cat".to_string(), 500),
            ("car".to_string(), 400),
            ("hello".to_string(), 300),
            ("world".to_string(), 200),
            ("there".to_string(), 100),
        ],
        vec![
            ("hello".to_string(), "world".to_string(), 10),
            ("hello".to_string(), "there".to_string(), 4),
            ("cat".to_string(), "food".to_string(), 3),
        ],
    ))
}

pub(super) fn test_preprompts() -> Vec<Preprompt> {
    vec![
        Preprompt::new("ai", "Summarize: {input}"),
        Preprompt::new("fix", "Fix grammar"),
    ]
}

pub(super) fn make_session() -> InputSession {
    InputSession::new(make_test_dict(), &Settings::default(), test_preprompts())
}

// Helper: simulate typing a string one character at a time
pub(super) fn type_string(
    session: &mut InputSession,
    doc: &mut MemoryDocument,
    s: &str,
) -> Vec<KeyResponse> {
    let mut responses = Vec::new();
    for ch in s.chars() {
        responses.push(session.handle_key(doc, KeyEvent::Text(ch.to_string())));
    }
    responses
}
