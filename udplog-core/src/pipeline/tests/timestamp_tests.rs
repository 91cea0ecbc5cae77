use crate::pipeline::{format_timestamp_prefix, stamp_line};
use chrono::{Local, TimeZone};
use pretty_assertions::assert_eq;

#[test]
fn prefix_has_millisecond_precision() {
    // Arrange
    let at = Local
        .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
        .unwrap()
        .checked_add_signed(chrono::TimeDelta::milliseconds(7))
        .unwrap();

    // Act
    let prefix = format_timestamp_prefix(at);

    // Assert
    assert_eq!(prefix, "20240102-03:04:05.007");
}

#[test]
fn stamped_line_is_prefix_space_line() {
    // Arrange
    let at = Local.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();

    // Act
    let line = stamp_line(at, "[OVEN/INFO] ok");

    // Assert
    assert_eq!(line, "20241231-23:59:59.000 [OVEN/INFO] ok");
}
