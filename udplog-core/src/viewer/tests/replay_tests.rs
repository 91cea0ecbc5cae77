use crate::viewer::{REPLAY_LINES_PER_TICK, ReplaySource, SAMPLE_LINES};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

#[test]
fn comments_and_blank_lines_are_skipped() {
    // Act
    let mut source = ReplaySource::from_text(
        "saved.txt",
        "# UDP Log Viewer live session — 20240101_000000\r\n\r\nA=1\r\n   \nB=2\n",
    );

    // Assert
    assert_eq!(source.remaining(), 2);
    assert_eq!(source.next_chunk(), vec!["A=1", "B=2"]);
    assert!(source.is_finished());
}

#[test]
fn chunks_are_bounded() {
    // Arrange
    let text: String = (0..100).map(|i| format!("line {i}\n")).collect();
    let mut source = ReplaySource::from_text("big", &text);

    // Act
    let first = source.next_chunk();

    // Assert
    assert_eq!(first.len(), REPLAY_LINES_PER_TICK);
    assert_eq!(source.remaining(), 100 - REPLAY_LINES_PER_TICK);
}

#[test]
fn from_file_uses_file_name_and_replaces_bad_utf8() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("capture.txt");
    fs::write(&path, b"ok\nbad \xff byte\n").unwrap();

    // Act
    let mut source = ReplaySource::from_file(&path).unwrap();

    // Assert
    assert_eq!(source.name(), "capture.txt");
    let lines = source.next_chunk();
    assert_eq!(lines[0], "ok");
    assert!(lines[1].contains('\u{FFFD}'));
}

#[test]
fn sample_has_every_line() {
    assert_eq!(ReplaySource::sample().remaining(), SAMPLE_LINES.len());
}
