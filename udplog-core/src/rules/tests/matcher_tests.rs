use crate::rules::{CompiledMatcher, MatchMode, compile, match_all, tokens};
use pretty_assertions::assert_eq;

#[test]
fn tokens_are_trimmed_and_empty_tokens_dropped() {
    // Arrange
    let pattern = " OVEN ; ;T11;  ";

    // Act
    let out: Vec<&str> = tokens(pattern).collect();

    // Assert
    assert_eq!(out, vec!["OVEN", "T11"]);
}

#[test]
fn substring_mode_compiles_literals() {
    // Act
    let matchers = compile("a;b", MatchMode::Substring);

    // Assert
    assert_eq!(matchers.len(), 2);
    assert!(matches!(&matchers[0], CompiledMatcher::Literal(s) if s == "a"));
    assert!(matches!(&matchers[1], CompiledMatcher::Literal(s) if s == "b"));
}

#[test]
fn substring_mode_does_not_interpret_regex_syntax() {
    // Arrange
    let matchers = compile("a.c", MatchMode::Substring);

    // Assert
    assert!(match_all("xa.cx", &matchers));
    assert!(!match_all("abc", &matchers));
}

#[test]
fn invalid_regex_token_is_dropped_and_rest_still_applies() {
    // Arrange
    let matchers = compile("mask=0x[0-9a-f]+;(unclosed", MatchMode::Regex);

    // Assert
    assert_eq!(matchers.len(), 1);
    assert!(match_all("STATUS received, mask=0x1010", &matchers));
    assert!(!match_all("STATUS received", &matchers));
}

#[test]
fn regex_matches_anywhere_in_line() {
    // Arrange
    let matchers = compile(r"heatRemMs=\d+", MatchMode::Regex);

    // Assert
    assert!(match_all("[OVEN/INFO] heaterIntent=1 heatRemMs=2000 restRemMs=0", &matchers));
}

#[test]
fn tokens_within_a_slot_are_anded() {
    // Arrange
    let matchers = compile("OVEN;door=1", MatchMode::Substring);

    // Assert
    assert!(match_all("[OVEN/WARN] door=1 lock=1", &matchers));
    assert!(!match_all("[OVEN/INFO] door=0 lock=0", &matchers));
}

#[test]
fn empty_matcher_list_matches_nothing() {
    // Arrange
    let matchers = compile(" ; ", MatchMode::Substring);

    // Assert
    assert!(matchers.is_empty());
    assert!(!match_all("anything", &matchers));
}
