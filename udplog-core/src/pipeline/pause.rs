use std::collections::VecDeque;

pub const PAUSE_CAPACITY: usize = 2_000;

/// Tail of the lines that arrived while the display was paused.
///
/// Holds at most `capacity` lines; on overflow the oldest line is dropped
/// and counted.
#[derive(Debug)]
pub struct PauseBuffer {
    lines: VecDeque<String>,
    capacity: usize,
    dropped: u64,
}

impl Default for PauseBuffer {
    fn default() -> Self {
        Self::with_capacity(PAUSE_CAPACITY)
    }
}

impl PauseBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    pub fn push(&mut self, line: String) {
        if self.lines.len() >= self.capacity {
            self.lines.pop_front();
            self.dropped += 1;
        }
        self.lines.push_back(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Take the buffered lines in arrival order together with the drop
    /// count, leaving the buffer empty.
    pub fn drain(&mut self) -> (u64, Vec<String>) {
        let dropped = std::mem::take(&mut self.dropped);
        (dropped, self.lines.drain(..).collect())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.dropped = 0;
    }
}
