use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

pub const REPLAY_TICK: Duration = Duration::from_millis(25);
pub const REPLAY_LINES_PER_TICK: usize = 40;

/// Built-in lines for trying rules without a device.
pub const SAMPLE_LINES: &[&str] = &[
    "[MAIN/INFO] ======================================================",
    "[MAIN/INFO] === ESP32-S3 + ST7701 480x480 + LVGL 9.4.x + Touch ===",
    "[MAIN/INFO] ======================================================",
    "[WIFI] Connected. IP: 192.168.0.103",
    "[UDP] selftest: sending 3 packets...",
    "[HOST/INFO] STATUS received, mask=0x0000 (    0x0000), adc=[203,0,0,0] tempRaw=203",
    "[OVEN/INFO] [T11] mode=0 door=0 lock=0 ntc=20.30 core=23.15 ui=23.15 ctrl=23.15 tgt=40.00 lo=37.00 hi=43.00 heaterIntent=0 heatRemMs=0 restRemMs=0",
    "[OVEN/INFO] [T11] mode=0 door=0 lock=0 ntc=20.80 core=23.20 ui=23.20 ctrl=23.20 tgt=40.00 lo=37.00 hi=43.00 heaterIntent=1 heatRemMs=2000 restRemMs=0",
    "[HEATER/DBG] pwm=4000Hz duty=50%",
    "[HOST/INFO] STATUS received, mask=0x1010 (    0x1010), adc=[205,0,0,0] tempRaw=205",
    "[OVEN/WARN] Door opened — entering WAIT",
    "[OVEN/INFO] [T11] mode=1 door=1 lock=1 ntc=21.00 core=23.25 ui=23.25 ctrl=23.25 tgt=40.00 lo=37.00 hi=43.00 heaterIntent=0 heatRemMs=0 restRemMs=3000",
    "[MAIN/INFO] Sample done.",
];

/// Lines waiting to be fed through the include/exclude rules.
#[derive(Debug, Default)]
pub struct ReplaySource {
    name: String,
    lines: VecDeque<String>,
}

impl ReplaySource {
    /// Blank lines and `#` comments (such as live-file headers) are skipped.
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        let lines = text
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.trim().is_empty() && !l.starts_with('#'))
            .map(str::to_string)
            .collect();

        Self {
            name: name.into(),
            lines,
        }
    }

    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::from_text(name, &String::from_utf8_lossy(&bytes)))
    }

    pub fn sample() -> Self {
        Self {
            name: "sample".to_string(),
            lines: SAMPLE_LINES.iter().map(|l| l.to_string()).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }

    pub fn is_finished(&self) -> bool {
        self.lines.is_empty()
    }

    /// Up to [`REPLAY_LINES_PER_TICK`] lines from the front.
    pub fn next_chunk(&mut self) -> Vec<String> {
        let n = REPLAY_LINES_PER_TICK.min(self.lines.len());
        self.lines.drain(..n).collect()
    }
}
