use crate::conf::report::ValidationReport;
use std::fmt::Display;

#[derive(Debug, Clone)]
pub struct RangeConstraint<T> {
    pub min: T,
    pub max: T,
    pub label: &'static str,
    pub units: Option<&'static str>,
}

pub const LISTENER_PORT: RangeConstraint<u32> = RangeConstraint {
    min: 1,
    max: 65_535,
    label: "listener.port",
    units: None,
};

pub const DISPLAY_MAX_LINES: RangeConstraint<u64> = RangeConstraint {
    min: crate::display::MIN_MAX_LINES as u64,
    max: crate::display::MAX_MAX_LINES as u64,
    label: "display.max_lines",
    units: Some("lines"),
};

pub const DISPLAY_TRIM_CHUNK: RangeConstraint<u64> = RangeConstraint {
    min: 1,
    max: crate::display::MAX_MAX_LINES as u64,
    label: "display.trim_chunk",
    units: Some("lines"),
};

pub const DISPLAY_FLUSH_INTERVAL_MS: RangeConstraint<u64> = RangeConstraint {
    min: 1,
    max: 10_000,
    label: "display.flush_interval_ms",
    units: Some("ms"),
};

pub const DISPLAY_FLUSH_BATCH: RangeConstraint<u64> = RangeConstraint {
    min: 1,
    max: 100_000,
    label: "display.flush_batch",
    units: Some("lines"),
};

impl<T> RangeConstraint<T>
where
    T: PartialOrd + Copy + Display,
{
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    fn describe(&self) -> String {
        match self.units {
            Some(units) => format!("{}..={} {units}", self.min, self.max),
            None => format!("{}..={}", self.min, self.max),
        }
    }

    /// Report an error when `value` is outside the range.
    pub fn check(&self, value: T, report: &mut ValidationReport) -> bool {
        if self.contains(value) {
            return true;
        }
        report.error(
            self.label,
            format!("{value} is out of range (expected {})", self.describe()),
            None,
        );
        false
    }

    /// Pull `value` into the range, leaving a warning when it moved.
    pub fn clamp(&self, value: T, report: &mut ValidationReport) -> T {
        let clamped = if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            return value;
        };

        report.warning(
            self.label,
            format!("{value} is out of range (expected {}); using {clamped}", self.describe()),
            None,
        );
        clamped
    }
}
