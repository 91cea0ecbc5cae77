use crate::viewer::Simulator;
use pretty_assertions::assert_eq;

#[test]
fn same_seed_same_stream() {
    // Arrange
    let mut a = Simulator::seeded(7);
    let mut b = Simulator::seeded(7);

    // Act
    let left: Vec<String> = (0..50).map(|_| a.next_line()).collect();
    let right: Vec<String> = (0..50).map(|_| b.next_line()).collect();

    // Assert
    assert_eq!(left, right);
}

#[test]
fn lines_look_like_device_output() {
    // Arrange
    let mut sim = Simulator::seeded(42);

    // Act
    let lines: Vec<String> = (0..200).map(|_| sim.next_line()).collect();

    // Assert
    assert!(lines.iter().all(|l| l.starts_with('[')));
    assert!(lines.iter().all(|l| !l.contains('\n')));
    assert!(lines.iter().any(|l| l.starts_with("[HOST/INFO] STATUS received")));
    assert!(lines.iter().any(|l| l.starts_with("[OVEN/INFO] [T11]")));
}
