use chrono::{DateTime, Local};

/// `YYYYMMDD-HH:MM:SS.mmm`
pub fn format_timestamp_prefix(at: DateTime<Local>) -> String {
    at.format("%Y%m%d-%H:%M:%S%.3f").to_string()
}

pub fn stamp_line(at: DateTime<Local>, line: &str) -> String {
    format!("{} {line}", format_timestamp_prefix(at))
}
