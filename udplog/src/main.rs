use clap::{Parser, Subcommand};
use udplog_core::cli::{self, ConfigCmd, ListenArgs, ReplayArgs};
use udplog_core::logging::init_logging;

#[derive(Parser, Debug)]
#[command(
    name = "udplog",
    version,
    about = "udplog: live UDP log viewer with filter, exclude and highlight rules"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Listen for UDP log lines (default)
    Listen(ListenArgs),

    /// Replay a saved log through the configured rules
    Replay(ReplayArgs),

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Listen(args)) => cli::run_listen(args),

        Some(Command::Replay(args)) => cli::run_replay(args),

        Some(Command::Config { cmd }) => {
            let _guard = init_logging(None);
            cli::config::run(cmd)
        }

        None => cli::run_listen(ListenArgs::default()),
    }
}
