use crate::display::{DEFAULT_FLUSH_BATCH, DEFAULT_MAX_LINES, DEFAULT_TRIM_CHUNK};
use crate::listener::DEFAULT_PORT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The configuration file as written.
///
/// Every section is optional. Values are checked by validation, not by
/// the parser, so out-of-range numbers produce a report instead of a
/// parse error.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfigSpec {
    pub listener: ListenerSpec,
    pub display: DisplaySpec,
    pub session: SessionSpec,
    pub filters: Vec<SlotSpec>,
    pub excludes: Vec<SlotSpec>,
    pub highlights: Vec<SlotSpec>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerSpec {
    /// IPv4 or IPv6 literal. Blank means all interfaces.
    pub bind: String,
    pub port: u32,
}

impl Default for ListenerSpec {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: DEFAULT_PORT as u32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplaySpec {
    pub max_lines: u64,
    pub trim_chunk: u64,
    /// Prefix accepted lines with the local arrival time.
    pub timestamp: bool,
    pub flush_interval_ms: u64,
    pub flush_batch: u64,
}

impl Default for DisplaySpec {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_MAX_LINES as u64,
            trim_chunk: DEFAULT_TRIM_CHUNK as u64,
            timestamp: false,
            flush_interval_ms: 50,
            flush_batch: DEFAULT_FLUSH_BATCH as u64,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logs_dir: Option<PathBuf>,
}

/// One rule slot as written in the file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SlotSpec {
    pub pattern: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mode: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub color: String,
}
