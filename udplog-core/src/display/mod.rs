//! Display side of the pipeline.
//!
//! Accepted lines wait in a [`DisplayQueue`] until the next tick drains a
//! bounded batch into a [`DisplaySink`]. The rendered lines are mirrored in
//! a [`Scrollback`] whose size is capped by chunked retention trimming.

mod queue;
mod scrollback;
mod sink;

#[cfg(test)]
mod tests;

pub use queue::{DEFAULT_FLUSH_BATCH, DEFAULT_FLUSH_INTERVAL, DisplayQueue, FlushReport};
pub use scrollback::{
    DEFAULT_MAX_LINES, DEFAULT_TRIM_CHUNK, MAX_MAX_LINES, MIN_MAX_LINES, RetentionState,
    Scrollback, clamp_max_lines,
};
pub use sink::{
    DisplayLine, DisplayMode, DisplaySink, MemorySink, TerminalSink, default_display_mode,
};
