use crate::conf::types::ConfigSpec;
use std::path::PathBuf;

/// Values given on the command line. They replace file values before
/// validation, so they are checked the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub bind: Option<String>,
    pub port: Option<u32>,
    pub timestamp: Option<bool>,
    pub max_lines: Option<u64>,
    pub logs_dir: Option<PathBuf>,
}

impl ConfigOverrides {
    pub fn apply(&self, spec: &mut ConfigSpec) {
        if let Some(bind) = &self.bind {
            spec.listener.bind = bind.clone();
        }
        if let Some(port) = self.port {
            spec.listener.port = port;
        }
        if let Some(timestamp) = self.timestamp {
            spec.display.timestamp = timestamp;
        }
        if let Some(max_lines) = self.max_lines {
            spec.display.max_lines = max_lines;
        }
        if let Some(dir) = &self.logs_dir {
            spec.session.logs_dir = Some(dir.clone());
        }
    }
}
