use aido_core::document::{DocumentSurface, MemoryDocument};

use super::{make_session, type_string};
use crate::{KeyEvent, Notice, SuggestionAction};

#[test]
fn test_undo_redo_walks_keystrokes() {
    let mut session = make_session();
    let mut doc = MemoryDocument::new();
    type_string(&mut session, &mut doc, "abc");

    session.handle_key(&mut doc, KeyEvent::Undo);
    assert_eq!(doc.text(), "ab");
    session.handle_key(&mut doc, KeyEvent::Undo);
    assert_eq!(doc.text(), "a");
    session.handle_key(&mut doc, KeyEvent::Redo);
    assert_eq!(doc.text(), "ab");
    session.handle_key(&mut doc, KeyEvent::Redo);
    assert_eq!(doc.text(), "abc");

    let resp = session.handle_key(&mut doc, KeyEvent::Redo);
    assert_eq!(resp.notice, Some(Notice::NothingToRedo));
    assert_eq!(doc.text(), "abc");
}

#[test]
fn test_nothing_to_undo() {
    let mut session = make_session();
    let mut doc = MemoryDocument::with_text("untouched");
    let resp = session.handle_key(&mut doc, KeyEvent::Undo);
    assert_eq!(resp.notice, Some(Notice::NothingToUndo));
    assert_eq!(resp.suggestions, SuggestionAction::Keep);
    assert_eq!(doc.text(), "untouched");
}

#[test]
fn test_undo_restores_cursor() {
    let mut session = make_session();
    let mut doc = MemoryDocument::with_text("hello");
    session.handle_key(&mut doc, KeyEvent::MoveCursor(-2));
    session.handle_key(&mut doc, KeyEvent::text("X"));
    assert_eq!(doc.text(), "helXlo");

    session.handle_key(&mut doc, KeyEvent::Undo);
    assert_eq!(doc.text(), "hello");
    assert_eq!(doc.cursor(), 3);
}

#[test]
fn test_new_edit_clears_redo() {
    let mut session = make_session();
    let mut doc = MemoryDocument::new();
    type_string(&mut session, &mut doc, "ab");
    session.handle_key(&mut doc, KeyEvent::Undo);
    assert!(session.history().can_redo());

    session.handle_key(&mut doc, KeyEvent::text("z"));
    assert!(!session.history().can_redo());
    let resp = session.handle_key(&mut doc, KeyEvent::Redo);
    assert_eq!(resp.notice, Some(Notice::NothingToRedo));
}

#[test]
fn test_undo_does_not_record_itself() {
    let mut session = make_session();
    let mut doc = MemoryDocument::new();
    type_string(&mut session, &mut doc, "abc");
    let depth = session.history().undo_len();
    session.handle_key(&mut doc, KeyEvent::Undo);
    assert_eq!(session.history().undo_len(), depth - 1);
}

#[test]
fn test_undo_pick_suggestion() {
    let mut session = make_session();
    let mut doc = MemoryDocument::new();
    type_string(&mut session, &mut doc, "ca");
    session.handle_key(&mut doc, KeyEvent::PickSuggestion("cat".to_string()));
    assert_eq!(doc.text(), "cat ");

    session.handle_key(&mut doc, KeyEvent::Undo);
    assert_eq!(doc.text(), "ca");
    assert_eq!(session.current_word(), "");
}

#[test]
fn test_undo_capacity_from_settings() {
    let mut session = make_session();
    let mut doc = MemoryDocument::new();
    for _ in 0..60 {
        session.handle_key(&mut doc, KeyEvent::text("x"));
    }
    assert_eq!(session.history().undo_len(), 50);
}
