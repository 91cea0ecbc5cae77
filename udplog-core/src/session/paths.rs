use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "UdpLogViewer";

/// Pick the directory that holds live session files.
///
/// An explicit directory wins; otherwise the platform data directory is
/// used, falling back to `./logs` when the platform has none.
pub fn resolve_logs_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }

    match dirs::data_dir() {
        Some(base) => base.join(APP_DIR).join("logs"),
        None => PathBuf::from("logs"),
    }
}

pub fn session_stamp(at: DateTime<Local>) -> String {
    at.format("%Y%m%d_%H%M%S").to_string()
}

pub fn live_file_name(at: DateTime<Local>) -> String {
    format!("udp_live_{}.txt", session_stamp(at))
}

/// Suggested file name for a manual save.
pub fn default_save_name(at: DateTime<Local>) -> String {
    format!("udp_log_{}.txt", session_stamp(at))
}
