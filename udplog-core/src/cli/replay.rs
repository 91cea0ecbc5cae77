use crate::cli::display_mode;
use crate::conf::{ConfigOverrides, load_config};
use crate::display::TerminalSink;
use crate::logging::init_logging;
use crate::session::resolve_logs_dir;
use crate::viewer::{LOOP_IDLE_SLEEP, ReplaySource, Viewer};
use anyhow::{Context, Result, bail};
use clap::Args;
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

#[derive(Args, Debug, Clone, Default)]
pub struct ReplayArgs {
    /// Saved log to replay
    pub file: Option<PathBuf>,

    /// Replay the built-in sample instead of a file
    #[arg(long, conflicts_with = "file")]
    pub sample: bool,

    /// Path to the config file providing the rules
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Never color output
    #[arg(long, conflicts_with = "pretty")]
    pub plain: bool,

    /// Always color output
    #[arg(long)]
    pub pretty: bool,
}

/// Feed a saved log through the configured rules into the terminal.
pub fn run_replay(args: ReplayArgs) -> Result<()> {
    let _guard = init_logging(None);

    let source = match (&args.file, args.sample) {
        (Some(path), _) => ReplaySource::from_file(path)
            .with_context(|| format!("could not open {}", path.display()))?,
        (None, true) => ReplaySource::sample(),
        (None, false) => bail!("nothing to replay: pass a FILE or --sample"),
    };

    let loaded = load_config(args.config.as_deref(), &ConfigOverrides::default())?;
    let logs_dir = resolve_logs_dir(loaded.config.logs_dir.as_deref());

    let sink = TerminalSink::stdout(display_mode(args.plain, args.pretty));
    let mut viewer = Viewer::new(loaded.config, logs_dir, sink);
    viewer.start_replay(source);

    while viewer.is_replaying() || viewer.has_pending() {
        viewer.tick(Instant::now());
        thread::sleep(LOOP_IDLE_SLEEP);
    }

    Ok(())
}
