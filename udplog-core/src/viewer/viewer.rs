use crate::conf::ViewerConfig;
use crate::display::{DisplayQueue, DisplaySink, FlushReport, RetentionState, Scrollback};
use crate::listener::{BindError, Listener, ListenerEvent, ListenerHandle, RxStats};
use crate::pipeline::IngestionPipeline;
use crate::rules::{RuleBook, RuleCategory, RuleError, SlotEdit};
use crate::session::{SaveError, SaveOutcome, default_save_name, save_log};
use crate::viewer::command::{Command, HELP};
use crate::viewer::replay::{REPLAY_TICK, ReplaySource};
use crate::viewer::simulate::{SIMULATION_INTERVAL, Simulator};
use crate::viewer::status::format_bytes;
use chrono::Local;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::time::{Duration, Instant};

/// Upper bound on how long the loop waits for a command between ticks.
pub const LOOP_IDLE_SLEEP: Duration = Duration::from_millis(10);

/// Listener events handled per tick, in multiples of the flush batch.
///
/// Whatever is left stays in the channel for the next tick so a flood of
/// datagrams cannot hold off rendering or commands.
pub const EVENT_BATCHES_PER_TICK: usize = 10;

/// Whether the consumer loop should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

struct Connection {
    handle: ListenerHandle,
    events: Receiver<ListenerEvent>,
    addr: SocketAddr,
}

/// The single consumer of listener events.
///
/// Owns the pipeline, the visible scrollback and the sink; everything runs
/// on the caller's thread, so flushes never overlap.
pub struct Viewer<S: DisplaySink> {
    config: ViewerConfig,
    logs_dir: PathBuf,
    rules: RuleBook,
    pipeline: IngestionPipeline,
    scrollback: Scrollback,
    sink: S,
    connection: Option<Connection>,
    stats: RxStats,
    simulator: Option<Simulator>,
    replay: Option<ReplaySource>,
    last_flush: Instant,
    last_sim: Instant,
    last_replay: Instant,
}

impl<S: DisplaySink> Viewer<S> {
    pub fn new(config: ViewerConfig, logs_dir: PathBuf, sink: S) -> Self {
        let rules = config.rules.clone();
        let pipeline =
            IngestionPipeline::new(rules.compile(), DisplayQueue::new(config.flush_batch));
        let scrollback = Scrollback::new(RetentionState::new(config.max_lines, config.trim_chunk));
        let now = Instant::now();

        Self {
            config,
            logs_dir,
            rules,
            pipeline,
            scrollback,
            sink,
            connection: None,
            stats: RxStats::default(),
            simulator: None,
            replay: None,
            last_flush: now,
            last_sim: now,
            last_replay: now,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn scrollback(&self) -> &Scrollback {
        &self.scrollback
    }

    pub fn pipeline(&self) -> &IngestionPipeline {
        &self.pipeline
    }

    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    pub fn stats(&self) -> RxStats {
        self.stats
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Address the listener is actually bound to.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.connection.as_ref().map(|c| c.addr)
    }

    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    //-------------------------------------------------------------------------
    // Connection lifecycle
    //-------------------------------------------------------------------------

    /// Start listening and open a fresh live logfile.
    ///
    /// A bind failure leaves the viewer disconnected. A live logfile that
    /// cannot be created is reported on the display but does not prevent
    /// the connection.
    pub fn connect(&mut self) -> Result<(), BindError> {
        if self.connection.is_some() {
            return Ok(());
        }

        let (tx, rx) = mpsc::channel();
        let handle = Listener::start(self.config.target, tx)?;
        let addr = handle.local_addr();

        self.stats = RxStats::default();
        self.pipeline.set_timestamps(self.config.timestamp);
        self.pipeline.reset_pause();

        let live_path = match self.pipeline.open_live_log(&self.logs_dir, Local::now()) {
            Ok(path) => Some(path.to_path_buf()),
            Err(e) => {
                tracing::error!(error = %e, "could not create live logfile");
                self.pipeline
                    .notice_raw(format!("[UI/ERROR] Could not create live logfile: {}", e.io()));
                None
            }
        };

        self.connection = Some(Connection {
            handle,
            events: rx,
            addr,
        });

        self.pipeline
            .notice(&format!("[UI/INFO] Listening on {addr}"), false);
        if let Some(path) = live_path {
            self.pipeline
                .notice_raw(format!("[UI/INFO] Live logfile: {}", path.display()));
        }

        Ok(())
    }

    /// Stop the listener, deliver what it already sent, then close the
    /// live logfile. A no-op when not connected.
    pub fn disconnect(&mut self) {
        let Some(mut connection) = self.connection.take() else {
            return;
        };

        connection.handle.stop();
        while let Ok(event) = connection.events.try_recv() {
            self.handle_event(event);
        }

        self.pipeline.close_live_log();
        self.simulator = None;
        self.pipeline.reset_pause();
        self.pipeline.notice("[UI/INFO] Listener stopped", false);
    }

    //-------------------------------------------------------------------------
    // Events
    //-------------------------------------------------------------------------

    pub fn handle_event(&mut self, event: ListenerEvent) {
        match event {
            ListenerEvent::Line(line) => {
                self.pipeline.ingest(&line);
            }
            ListenerEvent::Status(text) => {
                tracing::debug!(status = %text, "listener status");
                self.sink.status(&text);
            }
            ListenerEvent::Error(text) => {
                self.pipeline.notice(&format!("[UI/ERROR] {text}"), true);
                self.sink.status(&text);
            }
            ListenerEvent::Stats(stats) => {
                self.stats = stats;
            }
        }
    }

    /// Most events a single tick will take from the listener.
    pub fn event_budget(&self) -> usize {
        self.config.flush_batch.max(1) * EVENT_BATCHES_PER_TICK
    }

    /// Handle events that are already waiting, up to [`Self::event_budget`].
    pub fn drain_events(&mut self) -> usize {
        let budget = self.event_budget();
        let mut handled = 0;
        while handled < budget {
            let Some(connection) = self.connection.as_ref() else {
                return handled;
            };

            match connection.events.try_recv() {
                Ok(event) => {
                    self.handle_event(event);
                    handled += 1;
                }
                Err(TryRecvError::Empty) => return handled,
                Err(TryRecvError::Disconnected) => {
                    // The receive loop is gone without being asked to stop.
                    tracing::warn!("listener exited unexpectedly");
                    self.disconnect();
                    return handled;
                }
            }
        }
        handled
    }

    //-------------------------------------------------------------------------
    // Ticks
    //-------------------------------------------------------------------------

    /// One pass of the consumer loop at time `now`: pending events, due
    /// simulation and replay lines, and a display flush once the flush
    /// interval has passed.
    pub fn tick(&mut self, now: Instant) -> FlushReport {
        self.drain_events();

        if self.simulator.is_some() && now.duration_since(self.last_sim) >= SIMULATION_INTERVAL {
            self.last_sim = now;
            if let Some(line) = self.simulator.as_mut().map(Simulator::next_line) {
                self.pipeline.ingest(&line);
            }
        }

        if self.replay.is_some() && now.duration_since(self.last_replay) >= REPLAY_TICK {
            self.last_replay = now;
            self.replay_step();
        }

        if now.duration_since(self.last_flush) >= self.config.flush_interval {
            self.last_flush = now;
            return self.flush();
        }
        FlushReport::default()
    }

    /// Render one batch right away.
    pub fn flush(&mut self) -> FlushReport {
        self.pipeline.flush(&mut self.scrollback, &mut self.sink)
    }

    /// Lines accepted but not rendered yet.
    pub fn has_pending(&self) -> bool {
        !self.pipeline.queue().is_empty()
    }

    //-------------------------------------------------------------------------
    // Pause
    //-------------------------------------------------------------------------

    /// Freeze the display. Only meaningful while connected.
    pub fn pause(&mut self) -> bool {
        if self.connection.is_none() {
            return false;
        }
        self.pipeline.pause();
        self.sink.status("UI paused (logging continues)");
        true
    }

    pub fn resume(&mut self) -> u64 {
        if !self.pipeline.is_paused() {
            return 0;
        }
        let dropped = self.pipeline.resume();
        self.flush();
        self.sink.status("UI resumed");
        dropped
    }

    //-------------------------------------------------------------------------
    // Simulation and replay
    //-------------------------------------------------------------------------

    /// Synthetic traffic requires a connection so its lines land in the
    /// session logfile like real input.
    pub fn set_simulation(&mut self, enabled: bool) -> bool {
        self.set_simulator(enabled.then(Simulator::new))
    }

    pub fn set_simulator(&mut self, simulator: Option<Simulator>) -> bool {
        if simulator.is_some() && self.connection.is_none() {
            self.sink
                .status("Simulation requires CONNECTED (start listener first).");
            return false;
        }
        let on = simulator.is_some();
        self.simulator = simulator;
        self.sink
            .status(if on { "Simulation: ON" } else { "Simulation: OFF" });
        true
    }

    pub fn is_simulating(&self) -> bool {
        self.simulator.is_some()
    }

    /// Replace any running replay.
    pub fn start_replay(&mut self, source: ReplaySource) {
        self.sink.status(&format!(
            "Replay: {} ({} lines)",
            source.name(),
            source.remaining()
        ));
        self.replay = Some(source);
    }

    pub fn stop_replay(&mut self) {
        self.replay = None;
    }

    pub fn is_replaying(&self) -> bool {
        self.replay.is_some()
    }

    fn replay_step(&mut self) {
        let Some(replay) = self.replay.as_mut() else {
            return;
        };

        if replay.is_finished() {
            self.replay = None;
            self.sink.status("Replay finished");
            return;
        }

        for line in replay.next_chunk() {
            self.pipeline.ingest_replay(&line);
        }
    }

    //-------------------------------------------------------------------------
    // Save / clear / rules
    //-------------------------------------------------------------------------

    /// Save the session.
    ///
    /// Copies the open live logfile, or the last closed one, verbatim.
    /// Without either the visible lines are written. With no destination a
    /// `udp_log_<stamp>.txt` in the logs directory is used.
    pub fn save(&mut self, dest: Option<&Path>) -> Result<(PathBuf, SaveOutcome), SaveError> {
        let dest = match dest {
            Some(path) => path.to_path_buf(),
            None => self.logs_dir.join(default_save_name(Local::now())),
        };

        let source = self.pipeline.live_mut().save_source();
        let visible = self.scrollback.to_vec();
        let outcome = save_log(&dest, source.as_deref(), &visible)?;
        self.pipeline.live_mut().mark_saved();

        let msg = match &outcome {
            SaveOutcome::Copied { .. } => format!("Saved (copied): {}", dest.display()),
            SaveOutcome::Dumped { .. } => format!("Saved: {}", dest.display()),
        };
        self.sink.status(&msg);
        Ok((dest, outcome))
    }

    /// Clear the visible lines. Session stats and the logfile are untouched.
    pub fn clear(&mut self) {
        self.scrollback.clear();
        self.sink.cleared();
        self.sink.status("Cleared (UI only)");
    }

    /// Apply a slot edit and recompile the rules. Returns the affected slot.
    pub fn apply_rule_edit(
        &mut self,
        category: RuleCategory,
        edit: SlotEdit,
    ) -> Result<Option<usize>, RuleError> {
        let (rules, index) = self.rules.apply(category, edit)?;
        self.rules = rules;
        self.pipeline.set_rules(self.rules.compile());

        let compiled = self.pipeline.rules();
        tracing::info!(
            %category,
            filters = compiled.include.active_count(),
            excludes = compiled.exclude.active_count(),
            highlights = compiled.highlight.highlight_count(),
            "rules updated"
        );
        if category == RuleCategory::Highlight {
            self.sink.status(&format!(
                "Highlight rules active: {}",
                compiled.highlight.highlight_count()
            ));
        }
        Ok(index)
    }

    //-------------------------------------------------------------------------
    // Status
    //-------------------------------------------------------------------------

    pub fn status_line(&self) -> String {
        let shown = self.scrollback.len();
        let dropped = self.scrollback.trimmed_total();
        let hl = self.pipeline.rules().highlight.highlight_count();

        let Some(connection) = self.connection.as_ref() else {
            return format!(
                "Listener: OFF — {} — shown={shown} dropped={dropped} — HL={hl}",
                self.config.target
            );
        };

        let mut line = format!(
            "Listener: ON — {} — pkts={} lines={} — shown={shown} dropped={dropped} — HL={hl}",
            connection.addr, self.stats.packets, self.stats.lines
        );

        let live = self.pipeline.live();
        if let (Some(path), Some(size)) = (live.current_path(), live.size()) {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            line.push_str(&format!(" — LIVE: {name} ({})", format_bytes(size)));
        }

        if self.pipeline.is_paused() {
            let buffer = self.pipeline.pause_buffer();
            line.push_str(&format!(
                " — PAUSED (tail={} drop={})",
                buffer.len(),
                buffer.dropped()
            ));
        }

        line
    }

    //-------------------------------------------------------------------------
    // Commands and main loop
    //-------------------------------------------------------------------------

    pub fn handle_command(&mut self, command: Command) -> Flow {
        match command {
            Command::Pause => {
                self.pause();
            }
            Command::Resume => {
                self.resume();
            }
            Command::Save(dest) => {
                if let Err(e) = self.save(dest.as_deref()) {
                    tracing::error!(error = %e, "save failed");
                    self.sink.status(&format!("Save failed: {e}"));
                }
            }
            Command::Clear => self.clear(),
            Command::Status => {
                let line = self.status_line();
                self.sink.status(&line);
            }
            Command::Simulate(on) => {
                self.set_simulation(on);
            }
            Command::Rule { category, edit } => {
                if let Err(e) = self.apply_rule_edit(category, edit) {
                    self.sink.status(&format!("{category}: {e}"));
                }
            }
            Command::Help => self.sink.status(HELP),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Run until a `Quit` command arrives.
    ///
    /// Commands are taken between ticks; while none arrive the loop wakes
    /// every [`LOOP_IDLE_SLEEP`].
    pub fn run(&mut self, commands: &Receiver<Command>) {
        let mut commands_open = true;

        loop {
            if commands_open {
                match commands.recv_timeout(LOOP_IDLE_SLEEP) {
                    Ok(command) => {
                        if self.handle_command(command) == Flow::Quit {
                            return;
                        }
                    }
                    Err(RecvTimeoutError::Timeout) => {}
                    Err(RecvTimeoutError::Disconnected) => commands_open = false,
                }
            } else {
                std::thread::sleep(LOOP_IDLE_SLEEP);
            }

            self.tick(Instant::now());
        }
    }

    /// Disconnect and deliver every remaining line to the sink.
    pub fn shutdown(&mut self) {
        self.disconnect();
        self.stop_replay();
        while self.has_pending() {
            self.flush();
        }
    }
}

impl<S: DisplaySink> Drop for Viewer<S> {
    fn drop(&mut self) {
        self.disconnect();
    }
}
