use crate::cli::display_mode;
use crate::conf::{ConfigOverrides, load_config};
use crate::display::TerminalSink;
use crate::logging::init_logging;
use crate::session::resolve_logs_dir;
use crate::viewer::{Command, HELP, Viewer};
use anyhow::{Context, Result};
use clap::Args;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::thread;

#[derive(Args, Debug, Clone, Default)]
pub struct ListenArgs {
    /// Path to the config file (default: ./udplog.hcl when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Address to bind (IPv4 or IPv6 literal)
    #[arg(long)]
    pub bind: Option<String>,

    /// UDP port
    #[arg(long)]
    pub port: Option<u32>,

    /// Prefix accepted lines with the arrival time
    #[arg(long)]
    pub timestamp: bool,

    /// Visible scrollback cap (clamped to 1000..500000)
    #[arg(long)]
    pub max_lines: Option<u64>,

    /// Directory for live session files
    #[arg(long)]
    pub logs_dir: Option<PathBuf>,

    /// Never color output
    #[arg(long, conflicts_with = "pretty")]
    pub plain: bool,

    /// Always color output
    #[arg(long)]
    pub pretty: bool,

    /// Feed synthetic device traffic while connected
    #[arg(long)]
    pub simulate: bool,

    /// Save the session to this path on exit
    #[arg(long)]
    pub save_on_exit: Option<PathBuf>,
}

impl ListenArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            bind: self.bind.clone(),
            port: self.port,
            timestamp: self.timestamp.then_some(true),
            max_lines: self.max_lines,
            logs_dir: self.logs_dir.clone(),
        }
    }
}

pub fn run_listen(args: ListenArgs) -> Result<()> {
    let loaded = load_config(args.config.as_deref(), &args.overrides())?;
    if loaded.report.has_violations() {
        eprint!("{}", loaded.report.render_plain());
    }

    let logs_dir = resolve_logs_dir(loaded.config.logs_dir.as_deref());
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("failed to create logs directory {}", logs_dir.display()))?;
    let _guard = init_logging(Some(&logs_dir));

    let sink = TerminalSink::stdout(display_mode(args.plain, args.pretty));
    let mut viewer = Viewer::new(loaded.config, logs_dir, sink);

    viewer
        .connect()
        .context("failed to start UDP listener")?;
    if args.simulate {
        viewer.set_simulation(true);
    }

    let (tx, rx) = mpsc::channel::<Command>();
    spawn_stdin_reader(tx.clone());
    ctrlc::set_handler(move || {
        let _ = tx.send(Command::Quit);
    })
    .context("failed to install Ctrl-C handler")?;

    viewer.run(&rx);

    // Closing first makes the finished session the save source.
    viewer.disconnect();
    if let Some(dest) = args.save_on_exit.as_deref() {
        viewer
            .save(Some(dest))
            .with_context(|| format!("failed to save session to {}", dest.display()))?;
    }
    viewer.shutdown();

    eprintln!("{}", viewer.status_line());
    Ok(())
}

/// Reader thread: stdin -> parse -> send(Command)
fn spawn_stdin_reader(tx: Sender<Command>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines().map_while(|l| l.ok()) {
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(cmd) => {
                    // If receiver is gone, stop early.
                    if tx.send(cmd).is_err() {
                        break;
                    }
                }
                Err(e) => eprintln!("{e}\n{HELP}"),
            }
        }
        // tx is dropped here; the loop keeps running on Ctrl-C alone.
    });
}
