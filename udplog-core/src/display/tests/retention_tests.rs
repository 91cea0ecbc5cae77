use crate::display::{
    DEFAULT_MAX_LINES, MAX_MAX_LINES, MIN_MAX_LINES, RetentionState, Scrollback, clamp_max_lines,
};
use pretty_assertions::assert_eq;

fn filled(retention: RetentionState, n: usize) -> Scrollback {
    let mut scrollback = Scrollback::new(retention);
    for i in 0..n {
        scrollback.push(format!("line {i}"));
    }
    scrollback
}

#[test]
fn one_line_over_cap_trims_a_whole_chunk() {
    // Arrange
    let mut scrollback = filled(RetentionState::new(1000, 200), 1001);

    // Act
    let removed = scrollback.enforce_retention();

    // Assert
    assert_eq!(removed, 200);
    assert_eq!(scrollback.trimmed_total(), 200);
    assert_eq!(scrollback.len(), 801);
    assert_eq!(scrollback.lines().next(), Some("line 200"));
}

#[test]
fn at_cap_nothing_is_trimmed() {
    // Arrange
    let mut scrollback = filled(RetentionState::new(1000, 200), 1000);

    // Act
    let removed = scrollback.enforce_retention();

    // Assert
    assert_eq!(removed, 0);
    assert_eq!(scrollback.trimmed_total(), 0);
}

#[test]
fn large_excess_is_worked_down_one_chunk_per_pass() {
    // Arrange
    let mut scrollback = filled(RetentionState::new(1000, 200), 1500);

    // Act
    let first = scrollback.enforce_retention();
    let second = scrollback.enforce_retention();
    let third = scrollback.enforce_retention();

    // Assert
    assert_eq!((first, second, third), (200, 200, 200));
    assert_eq!(scrollback.len(), 900);
    assert_eq!(scrollback.trimmed_total(), 600);
    assert_eq!(scrollback.enforce_retention(), 0);
}

#[test]
fn trimmed_total_accumulates() {
    // Arrange
    let mut scrollback = filled(RetentionState::new(1000, 200), 1001);

    // Act
    scrollback.enforce_retention();
    for i in 0..400 {
        scrollback.push(format!("more {i}"));
    }
    scrollback.enforce_retention();

    // Assert
    assert_eq!(scrollback.trimmed_total(), 400);
}

#[test]
fn clear_resets_trimmed_total() {
    // Arrange
    let mut scrollback = filled(RetentionState::new(1000, 200), 1001);
    scrollback.enforce_retention();

    // Act
    scrollback.clear();

    // Assert
    assert!(scrollback.is_empty());
    assert_eq!(scrollback.trimmed_total(), 0);
}

#[test]
fn max_lines_is_clamped() {
    assert_eq!(clamp_max_lines(10), MIN_MAX_LINES);
    assert_eq!(clamp_max_lines(10_000_000), MAX_MAX_LINES);
    assert_eq!(clamp_max_lines(DEFAULT_MAX_LINES), DEFAULT_MAX_LINES);
    assert_eq!(RetentionState::new(0, 200).max_lines(), MIN_MAX_LINES);
}

#[test]
fn zero_trim_chunk_still_makes_progress() {
    // Arrange
    let mut scrollback = filled(RetentionState::new(1000, 0), 1001);

    // Act
    let removed = scrollback.enforce_retention();

    // Assert
    assert_eq!(removed, 1);
}
