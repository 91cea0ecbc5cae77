use crate::conf::ViewerConfig;
use crate::display::MemorySink;
use crate::listener::ListenerEvent;
use crate::rules::{PatternSlot, RuleCategory, RuleError, SlotColor, SlotEdit};
use crate::session::SaveOutcome;
use crate::viewer::{Command, Flow, ReplaySource, Viewer};
use pretty_assertions::assert_eq;
use std::fs;
use std::time::{Duration, Instant};
use tempfile::{TempDir, tempdir};

fn viewer() -> (Viewer<MemorySink>, TempDir) {
    let dir = tempdir().unwrap();
    let viewer = Viewer::new(
        ViewerConfig::default(),
        dir.path().to_path_buf(),
        MemorySink::new(),
    );
    (viewer, dir)
}

fn run_replay(viewer: &mut Viewer<MemorySink>) {
    let mut now = Instant::now();
    while viewer.is_replaying() || viewer.has_pending() {
        now += Duration::from_millis(50);
        viewer.tick(now);
    }
}

#[test]
fn status_line_when_disconnected() {
    // Arrange
    let (viewer, _dir) = viewer();

    // Act
    let line = viewer.status_line();

    // Assert
    assert_eq!(line, "Listener: OFF — 0.0.0.0:10514 — shown=0 dropped=0 — HL=0");
}

#[test]
fn pause_requires_connection() {
    // Arrange
    let (mut viewer, _dir) = viewer();

    // Act
    let paused = viewer.pause();

    // Assert
    assert!(!paused);
    assert!(!viewer.pipeline().is_paused());
}

#[test]
fn simulation_requires_connection() {
    // Arrange
    let (mut viewer, _dir) = viewer();

    // Act
    let started = viewer.set_simulation(true);

    // Assert
    assert!(!started);
    assert!(!viewer.is_simulating());
}

#[test]
fn replay_applies_include_and_exclude() {
    // Arrange
    let (mut viewer, _dir) = viewer();
    viewer
        .apply_rule_edit(
            RuleCategory::Filter,
            SlotEdit::Add {
                slot: PatternSlot::substring("[T11]"),
            },
        )
        .unwrap();
    viewer
        .apply_rule_edit(
            RuleCategory::Exclude,
            SlotEdit::Add {
                slot: PatternSlot::substring("door=1"),
            },
        )
        .unwrap();

    // Act
    viewer.start_replay(ReplaySource::sample());
    run_replay(&mut viewer);

    // Assert
    let texts = viewer.sink().texts();
    assert_eq!(texts.len(), 2);
    assert!(texts.iter().all(|t| t.contains("[T11]") && t.contains("door=0")));
    assert!(viewer.sink().statuses.iter().any(|s| s == "Replay finished"));
}

#[test]
fn highlight_edit_changes_rendered_color() {
    // Arrange
    let (mut viewer, _dir) = viewer();
    viewer
        .apply_rule_edit(
            RuleCategory::Highlight,
            SlotEdit::Set {
                index: 0,
                slot: PatternSlot::substring("WARN").with_color(SlotColor::Orange),
            },
        )
        .unwrap();

    // Act
    viewer.start_replay(ReplaySource::from_text("t", "[OVEN/WARN] Door opened\nplain\n"));
    run_replay(&mut viewer);

    // Assert
    let lines = &viewer.sink().lines;
    assert_eq!(lines[0].color, Some(SlotColor::Orange));
    assert_eq!(lines[1].color, None);
    assert!(viewer.status_line().ends_with("HL=1"));
}

#[test]
fn rule_edit_errors_leave_rules_unchanged() {
    // Arrange
    let (mut viewer, _dir) = viewer();
    for i in 0..5 {
        viewer
            .apply_rule_edit(
                RuleCategory::Exclude,
                SlotEdit::Add {
                    slot: PatternSlot::substring(format!("x{i}")),
                },
            )
            .unwrap();
    }
    let before = viewer.rules().clone();

    // Act
    let err = viewer
        .apply_rule_edit(
            RuleCategory::Exclude,
            SlotEdit::Add {
                slot: PatternSlot::substring("one too many"),
            },
        )
        .unwrap_err();

    // Assert
    assert_eq!(err, RuleError::NoFreeSlot);
    assert_eq!(viewer.rules(), &before);
}

#[test]
fn save_without_session_writes_visible_lines() {
    // Arrange
    let (mut viewer, dir) = viewer();
    viewer.start_replay(ReplaySource::from_text("t", "one\ntwo\n"));
    run_replay(&mut viewer);
    let dest = dir.path().join("saved.txt");

    // Act
    let (path, outcome) = viewer.save(Some(&dest)).unwrap();

    // Assert
    assert_eq!(path, dest);
    assert_eq!(outcome, SaveOutcome::Dumped { lines: 2 });
    assert_eq!(fs::read_to_string(&dest).unwrap(), "one\ntwo\n");
}

#[test]
fn save_without_destination_uses_logs_dir() {
    // Arrange
    let (mut viewer, dir) = viewer();

    // Act
    let (path, _) = viewer.save(None).unwrap();

    // Assert
    assert!(path.starts_with(dir.path()));
    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("udp_log_") && name.ends_with(".txt"));
}

#[test]
fn clear_resets_visible_lines_and_trim_counter() {
    // Arrange
    let (mut viewer, _dir) = viewer();
    viewer.start_replay(ReplaySource::from_text("t", "a\nb\n"));
    run_replay(&mut viewer);

    // Act
    viewer.clear();

    // Assert
    assert!(viewer.scrollback().is_empty());
    assert!(viewer.sink().lines.is_empty());
    assert!(viewer.status_line().contains("shown=0 dropped=0"));
}

#[test]
fn error_events_become_ui_error_lines() {
    // Arrange
    let (mut viewer, _dir) = viewer();

    // Act
    viewer.handle_event(ListenerEvent::Error("recvfrom failed: boom".to_string()));
    viewer.flush();

    // Assert
    assert_eq!(viewer.sink().texts(), vec!["[UI/ERROR] recvfrom failed: boom"]);
}

#[test]
fn stats_events_update_counters() {
    // Arrange
    let (mut viewer, _dir) = viewer();

    // Act
    viewer.handle_event(ListenerEvent::Stats(crate::listener::RxStats {
        packets: 3,
        lines: 7,
    }));

    // Assert
    assert_eq!(viewer.stats().packets, 3);
    assert_eq!(viewer.stats().lines, 7);
}

#[test]
fn quit_command_ends_the_loop() {
    // Arrange
    let (mut viewer, _dir) = viewer();

    // Act / Assert
    assert_eq!(viewer.handle_command(Command::Status), Flow::Continue);
    assert_eq!(viewer.handle_command(Command::Quit), Flow::Quit);
    assert!(viewer.sink().statuses.iter().any(|s| s.starts_with("Listener: OFF")));
}

#[test]
fn tick_flushes_only_after_interval() {
    // Arrange
    let (mut viewer, _dir) = viewer();
    viewer.handle_event(ListenerEvent::Line("early".to_string()));
    let start = Instant::now();

    // Act
    let too_soon = viewer.tick(start);
    let later = viewer.tick(start + Duration::from_millis(60));

    // Assert
    assert_eq!(too_soon.rendered, 0);
    assert_eq!(later.rendered, 1);
}
