use crate::display::scrollback::Scrollback;
use crate::display::sink::{DisplayLine, DisplaySink};
use crate::rules::{CompiledRuleSet, resolve_highlight};
use std::collections::VecDeque;
use std::time::Duration;

pub const DEFAULT_FLUSH_BATCH: usize = 300;
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
    pub rendered: usize,
    pub trimmed: usize,
}

/// FIFO of accepted lines awaiting render.
#[derive(Debug)]
pub struct DisplayQueue {
    pending: VecDeque<String>,
    max_batch: usize,
}

impl Default for DisplayQueue {
    fn default() -> Self {
        Self::new(DEFAULT_FLUSH_BATCH)
    }
}

impl DisplayQueue {
    pub fn new(max_batch: usize) -> Self {
        Self {
            pending: VecDeque::new(),
            max_batch: max_batch.max(1),
        }
    }

    pub fn push(&mut self, line: String) {
        self.pending.push_back(line);
    }

    pub fn extend<I: IntoIterator<Item = String>>(&mut self, lines: I) {
        self.pending.extend(lines);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn max_batch(&self) -> usize {
        self.max_batch
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Take up to one batch from the front.
    pub fn drain_batch(&mut self) -> Vec<String> {
        let n = self.max_batch.min(self.pending.len());
        self.pending.drain(..n).collect()
    }

    /// Render one batch into `sink`, then apply retention.
    ///
    /// An empty queue is a no-op: nothing is rendered and no trim runs.
    pub fn flush(
        &mut self,
        highlights: &CompiledRuleSet,
        scrollback: &mut Scrollback,
        sink: &mut dyn DisplaySink,
    ) -> FlushReport {
        let batch = self.drain_batch();
        if batch.is_empty() {
            return FlushReport::default();
        }

        let rendered = batch.len();
        for text in batch {
            let color = resolve_highlight(&text, highlights);
            sink.render(&DisplayLine {
                text: text.clone(),
                color,
            });
            scrollback.push(text);
        }

        let trimmed = scrollback.enforce_retention();
        if trimmed > 0 {
            sink.trimmed(trimmed);
        }

        FlushReport { rendered, trimmed }
    }
}
