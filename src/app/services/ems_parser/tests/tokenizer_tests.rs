//! Tests for line tokenization

use super::super::tokenizer::{TokenizerMode, tokenize_quoted, tokenize_whitespace};

#[test]
fn test_quoted_span_is_one_token() {
    let tokens = tokenize_quoted("101 'BUS ONE' 110.0 1");
    assert_eq!(tokens, vec!["101", "'BUS ONE'", "110.0", "1"]);
}

#[test]
fn test_repeated_spaces_produce_no_empty_tokens() {
    let tokens = tokenize_quoted("  101    'A  B'   7  ");
    assert_eq!(tokens, vec!["101", "'A  B'", "7"]);
}

#[test]
fn test_quote_inside_token_joins_following_text() {
    // The quote toggles state mid-token, so the space after it does not split
    let tokens = tokenize_quoted("ab'c d' e");
    assert_eq!(tokens, vec!["ab'c d'", "e"]);
}

#[test]
fn test_unmatched_quote_runs_to_end_of_line() {
    let tokens = tokenize_quoted("1 'open quote 2 3");
    assert_eq!(tokens, vec!["1", "'open quote 2 3"]);
}

#[test]
fn test_quote_aware_mode_splits_only_on_spaces() {
    // Tabs are not separators for quote-aware splitting
    let tokens = tokenize_quoted("1\t2 3");
    assert_eq!(tokens, vec!["1\t2", "3"]);
}

#[test]
fn test_whitespace_mode_ignores_quotes() {
    let tokens = tokenize_whitespace("101 'BUS ONE'\t110.0");
    assert_eq!(tokens, vec!["101", "'BUS", "ONE'", "110.0"]);
}

#[test]
fn test_empty_line_has_no_tokens() {
    assert!(tokenize_quoted("").is_empty());
    assert!(tokenize_whitespace("   ").is_empty());
}

#[test]
fn test_mode_dispatch() {
    let line = "1 'a b' 2";
    assert_eq!(TokenizerMode::QuoteAware.tokenize(line).len(), 3);
    assert_eq!(TokenizerMode::Whitespace.tokenize(line).len(), 4);
}
