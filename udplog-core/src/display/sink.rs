use crate::rules::SlotColor;
use owo_colors::OwoColorize;
use std::io::{self, IsTerminal, Write};

/// One rendered line and the highlight color chosen for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    pub text: String,
    pub color: Option<SlotColor>,
}

/// The rendering surface the display queue drains into.
pub trait DisplaySink {
    fn render(&mut self, line: &DisplayLine);

    /// Transient status text. Sinks without a status area ignore it.
    fn status(&mut self, _text: &str) {}

    /// Called after retention removed `count` lines from the front.
    fn trimmed(&mut self, _count: usize) {}

    /// Called when the visible buffer was cleared.
    fn cleared(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Plain text, no escape sequences.
    Plain,
    /// Highlight colors as 24-bit ANSI.
    Pretty,
}

pub fn default_display_mode() -> DisplayMode {
    if io::stdout().is_terminal() {
        DisplayMode::Pretty
    } else {
        DisplayMode::Plain
    }
}

/// Writes records to stdout and status text to stderr.
pub struct TerminalSink {
    mode: DisplayMode,
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
}

impl TerminalSink {
    pub fn stdout(mode: DisplayMode) -> Self {
        Self::new(mode, Box::new(io::stdout()), Box::new(io::stderr()))
    }

    pub fn new(mode: DisplayMode, out: Box<dyn Write + Send>, err: Box<dyn Write + Send>) -> Self {
        Self { mode, out, err }
    }
}

impl DisplaySink for TerminalSink {
    fn render(&mut self, line: &DisplayLine) {
        let res = match (self.mode, line.color.and_then(SlotColor::rgb)) {
            (DisplayMode::Pretty, Some((r, g, b))) => {
                writeln!(self.out, "{}", line.text.truecolor(r, g, b))
            }
            _ => writeln!(self.out, "{}", line.text),
        };

        // A closed stdout (e.g. `| head`) must not stop ingestion.
        if let Err(e) = res.and_then(|_| self.out.flush()) {
            tracing::debug!(error = %e, "stdout write failed");
        }
    }

    fn status(&mut self, text: &str) {
        let res = match self.mode {
            DisplayMode::Pretty => writeln!(self.err, "{}", text.dimmed()),
            DisplayMode::Plain => writeln!(self.err, "{text}"),
        };
        if let Err(e) = res {
            tracing::debug!(error = %e, "stderr write failed");
        }
    }
}

/// Keeps everything in memory. Used by tests and embedders that render
/// on their own schedule.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub lines: Vec<DisplayLine>,
    pub statuses: Vec<String>,
    pub trimmed: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }
}

impl DisplaySink for MemorySink {
    fn render(&mut self, line: &DisplayLine) {
        self.lines.push(line.clone());
    }

    fn status(&mut self, text: &str) {
        self.statuses.push(text.to_string());
    }

    fn trimmed(&mut self, count: usize) {
        self.trimmed += count;
    }

    fn cleared(&mut self) {
        self.lines.clear();
    }
}
