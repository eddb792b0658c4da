use std::sync::Arc;

use super::*;
use crate::dict::WordDictionary;

fn ca_dict() -> WordDictionary {
    WordDictionary::new(
        vec![
            ("can".into(), 900),
            ("cape".into(), 700),
            ("cat".into(), 500),
            ("car".into(), 400),
            ("hello".into(), 300),
        ],
        vec![
            ("hello".into(), "world".into(), 10),
            ("hello".into(), "there".into(), 4),
        ],
    )
}

fn recent_of(words: &[&str]) -> RecentWords {
    let mut r = RecentWords::default();
    // touch() puts each word at the front, so feed oldest first.
    for w in words.iter().rev() {
        r.touch(w);
    }
    r
}

#[test]
fn test_recent_matches_ranked_first_without_duplicates() {
    let dict = ca_dict();
    let recent = recent_of(&["cat", "car"]);
    let result = completions(&dict, "ca", &recent, 2, 6);
    assert_eq!(result, vec!["cat", "car", "can", "cape"]);
}

#[test]
fn test_recent_matches_capped() {
    let dict = ca_dict();
    let recent = recent_of(&["cart", "cast", "cave"]);
    let result = completions(&dict, "ca", &recent, 2, 6);
    assert_eq!(&result[..2], &["cart", "cast"]);
    assert!(!result.contains(&"cave".to_string()));
    assert_eq!(result.len(), 6);
}

#[test]
fn test_exact_recent_match_excluded() {
    let dict = ca_dict();
    let recent = recent_of(&["ca", "cab"]);
    let result = completions(&dict, "ca", &recent, 2, 6);
    assert_eq!(result[0], "cab");
    assert!(!result.contains(&"ca".to_string()));
}

#[test]
fn test_completions_case_insensitive() {
    let dict = ca_dict();
    let recent = recent_of(&["cat"]);
    let result = completions(&dict, "CA", &recent, 2, 3);
    assert_eq!(result, vec!["cat", "can", "cape"]);
}

#[test]
fn test_completions_limit() {
    let dict = ca_dict();
    let recent = recent_of(&["cat", "car"]);
    assert_eq!(completions(&dict, "ca", &recent, 2, 1), vec!["cat"]);
    assert!(completions(&dict, "ca", &recent, 2, 0).is_empty());
    assert!(completions(&dict, "", &recent, 2, 6).is_empty());
}

#[test]
fn test_predict_next() {
    let dict = ca_dict();
    assert_eq!(predict_next(&dict, "Hello,", 6), vec!["world", "there"]);
    assert_eq!(predict_next(&dict, "hello", 1), vec!["world"]);
    assert!(predict_next(&dict, "zebra", 6).is_empty());
    assert!(predict_next(&dict, "...", 6).is_empty());
}

#[test]
fn test_last_word() {
    assert_eq!(last_word("say hello "), Some("hello"));
    assert_eq!(last_word("say hello, "), Some("hello"));
    assert_eq!(last_word("it's"), Some("it's"));
    assert_eq!(last_word("   "), None);
    assert_eq!(last_word("-- "), None);
}

#[test]
fn test_context_accept_changes_ranking() {
    let mut ctx = RankingContext::new(Arc::new(ca_dict()));
    assert_eq!(ctx.completions("ca")[0], "can");
    ctx.accept("Car");
    assert_eq!(ctx.completions("ca")[0], "car");
    assert_eq!(ctx.recent().iter().next(), Some("car"));
}

#[test]
fn test_context_queries_do_not_mutate() {
    let ctx = RankingContext::new(Arc::new(ca_dict()));
    let _ = ctx.completions("ca");
    let _ = ctx.predict_next("hello");
    assert!(ctx.recent().is_empty());
}

#[test]
fn test_context_with_settings() {
    let settings = crate::settings::Settings::default();
    let ctx = RankingContext::with_settings(Arc::new(ca_dict()), &settings.suggestions);
    assert_eq!(ctx.max_results(), 6);
    assert_eq!(ctx.recent().capacity(), 50);
}
