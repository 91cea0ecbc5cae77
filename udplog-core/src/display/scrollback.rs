use std::collections::VecDeque;

pub const MIN_MAX_LINES: usize = 1_000;
pub const MAX_MAX_LINES: usize = 500_000;
pub const DEFAULT_MAX_LINES: usize = 20_000;
pub const DEFAULT_TRIM_CHUNK: usize = 2_000;

/// Retention bounds for the visible buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionState {
    max_lines: usize,
    trim_chunk: usize,
    trimmed_total: u64,
}

impl Default for RetentionState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINES, DEFAULT_TRIM_CHUNK)
    }
}

impl RetentionState {
    /// `max_lines` is clamped into `[MIN_MAX_LINES, MAX_MAX_LINES]` and a
    /// zero `trim_chunk` is treated as 1.
    pub fn new(max_lines: usize, trim_chunk: usize) -> Self {
        Self {
            max_lines: clamp_max_lines(max_lines),
            trim_chunk: trim_chunk.max(1),
            trimmed_total: 0,
        }
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    pub fn trim_chunk(&self) -> usize {
        self.trim_chunk
    }

    pub fn trimmed_total(&self) -> u64 {
        self.trimmed_total
    }

    pub fn set_max_lines(&mut self, max_lines: usize) {
        self.max_lines = clamp_max_lines(max_lines);
    }

    /// How many lines to drop from a buffer holding `visible` lines.
    pub fn trim_amount(&self, visible: usize) -> usize {
        if visible <= self.max_lines {
            return 0;
        }
        self.trim_chunk.min(visible)
    }
}

pub fn clamp_max_lines(max_lines: usize) -> usize {
    max_lines.clamp(MIN_MAX_LINES, MAX_MAX_LINES)
}

/// The lines currently visible to the consumer.
#[derive(Debug, Default)]
pub struct Scrollback {
    lines: VecDeque<String>,
    retention: RetentionState,
}

impl Scrollback {
    pub fn new(retention: RetentionState) -> Self {
        Self {
            lines: VecDeque::new(),
            retention,
        }
    }

    pub fn push(&mut self, line: String) {
        self.lines.push_back(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    pub fn retention(&self) -> &RetentionState {
        &self.retention
    }

    pub fn retention_mut(&mut self) -> &mut RetentionState {
        &mut self.retention
    }

    pub fn trimmed_total(&self) -> u64 {
        self.retention.trimmed_total
    }

    /// Drop the oldest chunk if the buffer is over its cap.
    ///
    /// Returns the number of lines removed.
    pub fn enforce_retention(&mut self) -> usize {
        let remove = self.retention.trim_amount(self.lines.len());
        if remove == 0 {
            return 0;
        }

        self.lines.drain(..remove);
        self.retention.trimmed_total += remove as u64;
        tracing::debug!(
            removed = remove,
            trimmed_total = self.retention.trimmed_total,
            "retention trim"
        );
        remove
    }

    /// Empty the visible buffer and reset the trim counter.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.retention.trimmed_total = 0;
    }
}
