use crate::display::{DisplayQueue, DisplaySink, FlushReport, Scrollback};
use crate::pipeline::pause::PauseBuffer;
use crate::pipeline::timestamp::stamp_line;
use crate::rules::CompiledRules;
use crate::session::{LiveLog, LiveLogError};
use chrono::{DateTime, Local};
use std::path::Path;

/// What happened to one ingested line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Failed an active filter slot.
    Filtered,
    /// Matched an exclude slot.
    Excluded,
    /// Accepted and parked in the pause buffer.
    Paused,
    /// Accepted and queued for display.
    Queued,
}

impl Disposition {
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Paused | Self::Queued)
    }
}

/// Filter, stamp, persist and route accepted lines.
///
/// For every line the order is fixed: include check, exclude check,
/// optional timestamp, live-file append, then either the pause buffer or
/// the display queue. Pausing only affects the last step; the live file
/// keeps receiving every accepted line.
#[derive(Debug, Default)]
pub struct IngestionPipeline {
    rules: CompiledRules,
    timestamps: bool,
    live: LiveLog,
    paused: bool,
    pause: PauseBuffer,
    queue: DisplayQueue,
}

impl IngestionPipeline {
    pub fn new(rules: CompiledRules, queue: DisplayQueue) -> Self {
        Self {
            rules,
            queue,
            ..Self::default()
        }
    }

    pub fn rules(&self) -> &CompiledRules {
        &self.rules
    }

    pub fn set_rules(&mut self, rules: CompiledRules) {
        self.rules = rules;
    }

    pub fn timestamps(&self) -> bool {
        self.timestamps
    }

    /// Timestamps are fixed per session; callers switch them between
    /// connections.
    pub fn set_timestamps(&mut self, enabled: bool) {
        self.timestamps = enabled;
    }

    pub fn live(&self) -> &LiveLog {
        &self.live
    }

    pub fn live_mut(&mut self) -> &mut LiveLog {
        &mut self.live
    }

    pub fn queue(&self) -> &DisplayQueue {
        &self.queue
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause_buffer(&self) -> &PauseBuffer {
        &self.pause
    }

    pub fn ingest(&mut self, line: &str) -> Disposition {
        self.ingest_at(line, Local::now())
    }

    pub fn ingest_at(&mut self, line: &str, now: DateTime<Local>) -> Disposition {
        if !crate::rules::match_include_slots(line, &self.rules.include) {
            return Disposition::Filtered;
        }
        if crate::rules::match_exclude_slots(line, &self.rules.exclude) {
            return Disposition::Excluded;
        }

        let out = self.stamp(line, now);
        self.persist(&out);

        if self.paused {
            self.pause.push(out);
            return Disposition::Paused;
        }

        self.queue.push(out);
        Disposition::Queued
    }

    /// Replayed lines only pass the include and exclude checks. They are
    /// never stamped, persisted or held by pause.
    pub fn ingest_replay(&mut self, line: &str) -> Disposition {
        if !self.rules.accepts(line) {
            return if crate::rules::match_include_slots(line, &self.rules.include) {
                Disposition::Excluded
            } else {
                Disposition::Filtered
            };
        }

        self.queue.push(line.to_string());
        Disposition::Queued
    }

    /// Show a line that bypasses the rules and the pause buffer.
    ///
    /// With `persist` the line is also appended to the live file.
    pub fn notice(&mut self, text: &str, persist: bool) {
        self.notice_at(text, persist, Local::now());
    }

    pub fn notice_at(&mut self, text: &str, persist: bool, now: DateTime<Local>) {
        let out = self.stamp(text, now);
        if persist {
            self.persist(&out);
        }
        self.queue.push(out);
    }

    /// Queue a line exactly as given.
    pub fn notice_raw(&mut self, text: impl Into<String>) {
        self.queue.push(text.into());
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Leave pause mode.
    ///
    /// If lines were dropped while paused, one marker line with the exact
    /// count goes first, followed by the buffered tail in arrival order.
    /// Returns the number of dropped lines. The caller is expected to flush
    /// right away.
    pub fn resume(&mut self) -> u64 {
        if !self.paused {
            return 0;
        }
        self.paused = false;

        let (dropped, tail) = self.pause.drain();
        if dropped > 0 {
            self.queue.push(format!(
                "[UI/INFO] Resume: {dropped} lines skipped while paused (showing latest tail)."
            ));
        }
        tracing::debug!(dropped, replayed = tail.len(), "resumed display");
        self.queue.extend(tail);
        dropped
    }

    /// Leave pause mode and forget whatever was buffered.
    pub fn reset_pause(&mut self) {
        self.paused = false;
        self.pause.clear();
    }

    /// Start a new live file.
    pub fn open_live_log(
        &mut self,
        dir: &Path,
        started: DateTime<Local>,
    ) -> Result<&Path, LiveLogError> {
        self.live.open(dir, started)
    }

    pub fn close_live_log(&mut self) {
        self.live.close();
    }

    /// Drain one batch into the sink and flush the live file.
    pub fn flush(&mut self, scrollback: &mut Scrollback, sink: &mut dyn DisplaySink) -> FlushReport {
        if let Err(e) = self.live.flush() {
            self.report_live_failure(&e);
        }
        self.queue.flush(&self.rules.highlight, scrollback, sink)
    }

    /// Drop lines that were queued but not rendered yet.
    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    fn stamp(&self, line: &str, now: DateTime<Local>) -> String {
        if self.timestamps {
            stamp_line(now, line)
        } else {
            line.to_string()
        }
    }

    fn persist(&mut self, line: &str) {
        if let Err(e) = self.live.write(line) {
            self.report_live_failure(&e);
        }
    }

    // The live log has already closed itself; this only makes the failure visible.
    fn report_live_failure(&mut self, e: &LiveLogError) {
        self.queue
            .push(format!("[UI/ERROR] Live logfile write failed: {}", e.io()));
    }
}
