use crate::display::{DisplayQueue, FlushReport, MemorySink, RetentionState, Scrollback};
use crate::rules::{CompiledRuleSet, PatternSlot, RuleSet, SlotColor};
use pretty_assertions::assert_eq;

fn no_highlights() -> CompiledRuleSet {
    CompiledRuleSet::default()
}

#[test]
fn empty_queue_flush_is_a_no_op() {
    // Arrange
    let mut queue = DisplayQueue::default();
    let mut scrollback = Scrollback::default();
    let mut sink = MemorySink::new();

    // Act
    let report = queue.flush(&no_highlights(), &mut scrollback, &mut sink);

    // Assert
    assert_eq!(report, FlushReport::default());
    assert!(sink.lines.is_empty());
}

#[test]
fn flush_drains_at_most_one_batch_in_order() {
    // Arrange
    let mut queue = DisplayQueue::new(300);
    queue.extend((0..450).map(|i| format!("line {i}")));
    let mut scrollback = Scrollback::default();
    let mut sink = MemorySink::new();

    // Act
    let first = queue.flush(&no_highlights(), &mut scrollback, &mut sink);

    // Assert
    assert_eq!(first.rendered, 300);
    assert_eq!(queue.len(), 150);
    assert_eq!(sink.lines[0].text, "line 0");
    assert_eq!(sink.lines[299].text, "line 299");

    // Act
    let second = queue.flush(&no_highlights(), &mut scrollback, &mut sink);

    // Assert
    assert_eq!(second.rendered, 150);
    assert!(queue.is_empty());
    assert_eq!(sink.lines[449].text, "line 449");
    assert_eq!(scrollback.len(), 450);
}

#[test]
fn flush_attaches_highlight_color() {
    // Arrange
    let rules = RuleSet::from_slots([PatternSlot::substring("ERROR").with_color(SlotColor::Red)])
        .unwrap();
    let highlights = CompiledRuleSet::compile(&rules);
    let mut queue = DisplayQueue::default();
    queue.push("[HOST/ERROR] UART timeout".to_string());
    queue.push("[HOST/INFO] ok".to_string());
    let mut scrollback = Scrollback::default();
    let mut sink = MemorySink::new();

    // Act
    queue.flush(&highlights, &mut scrollback, &mut sink);

    // Assert
    assert_eq!(sink.lines[0].color, Some(SlotColor::Red));
    assert_eq!(sink.lines[1].color, None);
}

#[test]
fn flush_runs_retention_after_rendering() {
    // Arrange
    let mut queue = DisplayQueue::new(2000);
    queue.extend((0..1001).map(|i| i.to_string()));
    let mut scrollback = Scrollback::new(RetentionState::new(1000, 200));
    let mut sink = MemorySink::new();

    // Act
    let report = queue.flush(&no_highlights(), &mut scrollback, &mut sink);

    // Assert
    assert_eq!(report, FlushReport { rendered: 1001, trimmed: 200 });
    assert_eq!(sink.trimmed, 200);
    assert_eq!(scrollback.len(), 801);
}
