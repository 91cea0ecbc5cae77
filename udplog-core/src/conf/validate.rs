use crate::conf::range::{
    DISPLAY_FLUSH_BATCH, DISPLAY_FLUSH_INTERVAL_MS, DISPLAY_MAX_LINES, DISPLAY_TRIM_CHUNK,
    LISTENER_PORT,
};
use crate::conf::report::ValidationReport;
use crate::conf::types::{ConfigSpec, SlotSpec};
use crate::display::{
    DEFAULT_FLUSH_BATCH, DEFAULT_FLUSH_INTERVAL, DEFAULT_MAX_LINES, DEFAULT_TRIM_CHUNK,
};
use crate::listener::{BindTarget, DEFAULT_BIND_ADDR};
use crate::rules::{MatchMode, PatternSlot, RuleBook, RuleSet, SLOT_COUNT, SlotColor, tokens};
use regex::Regex;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Settings the viewer runs with, after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub target: BindTarget,
    pub max_lines: usize,
    pub trim_chunk: usize,
    pub timestamp: bool,
    pub flush_interval: Duration,
    pub flush_batch: usize,
    /// Unresolved; see [`crate::session::resolve_logs_dir`].
    pub logs_dir: Option<PathBuf>,
    pub rules: RuleBook,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            target: BindTarget::default(),
            max_lines: DEFAULT_MAX_LINES,
            trim_chunk: DEFAULT_TRIM_CHUNK,
            timestamp: false,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            flush_batch: DEFAULT_FLUSH_BATCH,
            logs_dir: None,
            rules: RuleBook::default(),
        }
    }
}

/// A validated config together with the warnings raised on the way.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub config: ViewerConfig,
    pub spec: ConfigSpec,
    pub report: ValidationReport,
}

/// Check every section, collecting all problems before giving up.
pub fn validate_config(spec: &ConfigSpec) -> (Option<ViewerConfig>, ValidationReport) {
    let mut report = ValidationReport::default();

    let addr = if spec.listener.bind.trim().is_empty() {
        Some(DEFAULT_BIND_ADDR)
    } else {
        match spec.listener.bind.trim().parse::<IpAddr>() {
            Ok(addr) => Some(addr),
            Err(_) => {
                report.invalid_bind_addr(&spec.listener.bind);
                None
            }
        }
    };
    let port_ok = LISTENER_PORT.check(spec.listener.port, &mut report);

    let max_lines = DISPLAY_MAX_LINES.clamp(spec.display.max_lines, &mut report);
    let trim_ok = DISPLAY_TRIM_CHUNK.check(spec.display.trim_chunk, &mut report);
    let interval_ok = DISPLAY_FLUSH_INTERVAL_MS.check(spec.display.flush_interval_ms, &mut report);
    let batch_ok = DISPLAY_FLUSH_BATCH.check(spec.display.flush_batch, &mut report);

    let filters = validate_slots("filters", &spec.filters, false, &mut report);
    let excludes = validate_slots("excludes", &spec.excludes, false, &mut report);
    let highlights = validate_slots("highlights", &spec.highlights, true, &mut report);

    let config = match (addr, filters, excludes, highlights) {
        (Some(addr), Some(filters), Some(excludes), Some(highlights))
            if port_ok && trim_ok && interval_ok && batch_ok =>
        {
            Some(ViewerConfig {
                target: BindTarget {
                    addr,
                    port: spec.listener.port as u16,
                },
                max_lines: max_lines as usize,
                trim_chunk: spec.display.trim_chunk as usize,
                timestamp: spec.display.timestamp,
                flush_interval: Duration::from_millis(spec.display.flush_interval_ms),
                flush_batch: spec.display.flush_batch as usize,
                logs_dir: spec.session.logs_dir.clone(),
                rules: RuleBook {
                    filters,
                    excludes,
                    highlights,
                },
            })
        }
        _ => None,
    };

    (config, report)
}

/// Like [`validate_config`], failing when any error was reported.
pub fn validate_spec(spec: &ConfigSpec) -> Result<ViewerConfig, ValidationReport> {
    match validate_config(spec) {
        (Some(config), report) if !report.has_errors() => Ok(config),
        (_, report) => Err(report),
    }
}

fn validate_slots(
    category: &str,
    specs: &[SlotSpec],
    allow_color: bool,
    report: &mut ValidationReport,
) -> Option<RuleSet> {
    if specs.len() > SLOT_COUNT {
        report.too_many_slots(category, specs.len(), SLOT_COUNT);
        return None;
    }

    let mut ok = true;
    let mut slots = Vec::with_capacity(specs.len());

    for (i, spec) in specs.iter().enumerate() {
        let field = format!("{category}[{i}]");

        let mode = match spec.mode.parse::<MatchMode>() {
            Ok(mode) => mode,
            Err(_) => {
                report.unknown_mode(format!("{field}.mode"), &spec.mode);
                ok = false;
                continue;
            }
        };

        let color = match spec.color.parse::<SlotColor>() {
            Ok(color) => color,
            Err(_) => {
                report.unknown_color(format!("{field}.color"), &spec.color);
                ok = false;
                continue;
            }
        };

        if !allow_color && !color.is_none() {
            report.color_without_effect(format!("{field}.color"));
        }

        if mode == MatchMode::Regex {
            for token in tokens(&spec.pattern) {
                if let Err(e) = Regex::new(token) {
                    report.invalid_regex_token(format!("{field}.pattern"), token, &e.to_string());
                }
            }
        }

        let color = if allow_color { color } else { SlotColor::None };
        slots.push(PatternSlot::new(spec.pattern.clone(), mode, color));
    }

    if !ok {
        return None;
    }

    // Length was checked above.
    RuleSet::from_slots(slots).ok()
}
