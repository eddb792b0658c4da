use aido_core::document::{DocumentSurface, MemoryDocument};

use super::{make_session, type_string};
use crate::{KeyEvent, SuggestionAction};

fn shown(action: &SuggestionAction) -> Vec<&str> {
    match action {
        SuggestionAction::Show { words } => words.iter().map(String::as_str).collect(),
        _ => Vec::new(),
    }
}

#[test]
fn test_typing_shows_completions() {
    let mut session = make_session();
    let mut doc = MemoryDocument::new();
    let responses = type_string(&mut session, &mut doc, "ca");
    assert_eq!(doc.text(), "ca");
    assert_eq!(session.current_word(), "ca");
    assert_eq!(
        shown(&responses[1].suggestions),
        vec!["can", "cape", "cat", "car"]
    );
    assert_eq!(session.suggestions(), ["can", "cape", "cat", "car"]);
}

#[test]
fn test_space_switches_to_predictions() {
    let mut session = make_session();
    let mut doc = MemoryDocument::new();
    let responses = type_string(&mut session, &mut doc, "Hello ");
    assert_eq!(session.current_word(), "");
    assert_eq!(shown(&responses[5].suggestions), vec!["world", "there"]);
}

#[test]
fn test_unknown_word_hides_strip() {
    let mut session = make_session();
    let mut doc = MemoryDocument::new();
    let responses = type_string(&mut session, &mut doc, "zz");
    assert_eq!(responses[1].suggestions, SuggestionAction::Hide);
    assert!(session.suggestions().is_empty());
}

#[test]
fn test_backspace_trims_current_word() {
    let mut session = make_session();
    let mut doc = MemoryDocument::new();
    type_string(&mut session, &mut doc, "cat");

    let resp = session.handle_key(&mut doc, KeyEvent::Backspace);
    assert_eq!(doc.text(), "ca");
    assert_eq!(session.current_word(), "ca");
    assert_eq!(shown(&resp.suggestions).len(), 4);

    session.handle_key(&mut doc, KeyEvent::Backspace);
    let resp = session.handle_key(&mut doc, KeyEvent::Backspace);
    assert_eq!(doc.text(), "");
    assert_eq!(resp.suggestions, SuggestionAction::Hide);
}

#[test]
fn test_backspace_without_word_keeps_strip() {
    let mut session = make_session();
    let mut doc = MemoryDocument::with_text("hello ");
    let resp = session.handle_key(&mut doc, KeyEvent::Backspace);
    assert_eq!(doc.text(), "hello");
    assert_eq!(resp.suggestions, SuggestionAction::Keep);
}

#[test]
fn test_backspace_on_empty_document() {
    let mut session = make_session();
    let mut doc = MemoryDocument::new();
    let resp = session.handle_key(&mut doc, KeyEvent::Backspace);
    assert_eq!(doc.text(), "");
    assert_eq!(resp.suggestions, SuggestionAction::Keep);
}

#[test]
fn test_pick_suggestion_replaces_partial_word() {
    let mut session = make_session();
    let mut doc = MemoryDocument::with_text("my ");
    type_string(&mut session, &mut doc, "ca");

    let resp = session.handle_key(&mut doc, KeyEvent::PickSuggestion("cat".to_string()));
    assert_eq!(doc.text(), "my cat ");
    assert_eq!(doc.cursor(), 7);
    assert_eq!(session.current_word(), "");
    assert_eq!(session.recent().iter().next(), Some("cat"));
    // Next-word prediction for the picked word.
    assert_eq!(shown(&resp.suggestions), vec!["food"]);
}

#[test]
fn test_picked_word_ranks_first_next_time() {
    let mut session = make_session();
    let mut doc = MemoryDocument::new();
    type_string(&mut session, &mut doc, "ca");
    session.handle_key(&mut doc, KeyEvent::PickSuggestion("car".to_string()));

    let responses = type_string(&mut session, &mut doc, "ca");
    assert_eq!(shown(&responses[1].suggestions)[0], "car");
}

#[test]
fn test_pick_is_one_atomic_edit() {
    let mut session = make_session();
    let mut doc = MemoryDocument::new();
    type_string(&mut session, &mut doc, "ca");
    session.handle_key(&mut doc, KeyEvent::PickSuggestion("cape".to_string()));
    assert_eq!(doc.atomic_groups(), 1);
}

#[test]
fn test_enter_inserts_newline_and_hides() {
    let mut session = make_session();
    let mut doc = MemoryDocument::new();
    type_string(&mut session, &mut doc, "ca");
    let resp = session.handle_key(&mut doc, KeyEvent::Enter);
    assert_eq!(doc.text(), "ca\n");
    assert_eq!(session.current_word(), "");
    assert_eq!(resp.suggestions, SuggestionAction::Hide);
}

#[test]
fn test_move_cursor_clamps() {
    let mut session = make_session();
    let mut doc = MemoryDocument::with_text("hello");
    session.handle_key(&mut doc, KeyEvent::MoveCursor(-2));
    assert_eq!(doc.cursor(), 3);
    session.handle_key(&mut doc, KeyEvent::MoveCursor(-100));
    assert_eq!(doc.cursor(), 0);
    session.handle_key(&mut doc, KeyEvent::MoveCursor(i64::MAX));
    assert_eq!(doc.cursor(), 5);
    assert_eq!(doc.text(), "hello");
}

#[test]
fn test_move_cursor_ends_word() {
    let mut session = make_session();
    let mut doc = MemoryDocument::new();
    type_string(&mut session, &mut doc, "ca");
    let resp = session.handle_key(&mut doc, KeyEvent::MoveCursor(-1));
    assert_eq!(session.current_word(), "");
    assert_eq!(resp.suggestions, SuggestionAction::Hide);
}

#[test]
fn test_text_chunk_tracks_trailing_word() {
    let mut session = make_session();
    let mut doc = MemoryDocument::new();
    session.handle_key(&mut doc, KeyEvent::text("say ca"));
    assert_eq!(session.current_word(), "ca");
    session.handle_key(&mut doc, KeyEvent::text(""));
    assert_eq!(doc.text(), "say ca");
}

#[test]
fn test_reset_clears_field_state() {
    let mut session = make_session();
    let mut doc = MemoryDocument::new();
    type_string(&mut session, &mut doc, "ca");
    session.reset();
    assert_eq!(session.current_word(), "");
    assert!(session.suggestions().is_empty());
    assert!(!session.history().can_undo());
}
