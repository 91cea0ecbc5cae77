use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_FILE_NAME: &str = "udplog.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize diagnostics.
///
/// - `TOKIO_CONSOLE` set: tokio-console instrumentation only
/// - `log_dir` given: JSON lines appended to a daily-rolling `udplog.log`
///   in that directory (stdout belongs to the record stream)
/// - otherwise: JSON lines on stderr
///
/// The returned guard flushes the file writer on drop and must be held
/// until shutdown.
pub fn init_logging(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    // If tokio-console is enabled, DO NOT install the normal subscriber
    if std::env::var("TOKIO_CONSOLE").is_ok() {
        init_console_logging();
        return None;
    }

    match log_dir {
        Some(dir) => Some(init_file_logging(dir)),
        None => {
            init_stderr_logging();
            None
        }
    }
}

fn init_file_logging(dir: &Path) -> WorkerGuard {
    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    fmt()
        .with_env_filter(env_filter())
        .json()
        .flatten_event(true)
        .with_writer(writer)
        .init();

    guard
}

fn init_stderr_logging() {
    fmt()
        .with_env_filter(env_filter())
        .json()
        .flatten_event(true)
        .with_writer(std::io::stderr)
        .init();
}

fn init_console_logging() {
    console_subscriber::init();
}
