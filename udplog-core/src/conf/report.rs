use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Dotted path of the offending value, e.g. `listener.port`.
    pub field: String,
    pub message: String,
    pub help: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_violations(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }

    pub(crate) fn error(&mut self, field: impl Into<String>, message: String, help: Option<String>) {
        self.errors.push(ValidationIssue {
            severity: Severity::Error,
            field: field.into(),
            message,
            help,
        });
    }

    pub(crate) fn warning(&mut self, field: impl Into<String>, message: String, help: Option<String>) {
        self.warnings.push(ValidationIssue {
            severity: Severity::Warning,
            field: field.into(),
            message,
            help,
        });
    }

    pub fn render_plain(&self) -> String {
        let mut out = String::new();
        for issue in self.errors.iter().chain(self.warnings.iter()) {
            let severity = match issue.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            let _ = writeln!(out, "{}: {}: {}", issue.field, severity, issue.message);
            if let Some(help) = &issue.help {
                let _ = writeln!(out, "  help: {help}");
            }
        }
        out
    }

    pub fn render_pretty(&self) -> String {
        let mut out = String::new();
        if self.has_errors() {
            let _ = writeln!(
                out,
                "configuration validation failed ({} errors, {} warnings)\n",
                self.errors.len(),
                self.warnings.len()
            );
        }

        for issue in self.errors.iter().chain(self.warnings.iter()) {
            let label = match issue.severity {
                Severity::Error => "error".red().bold().to_string(),
                Severity::Warning => "warning".yellow().bold().to_string(),
            };
            let _ = writeln!(out, "  {label}: {} ({})", issue.message, issue.field.dimmed());
            if let Some(help) = &issue.help {
                let _ = writeln!(out, "  help: {help}");
            }
        }
        out
    }
}

/// Listener spec validation
impl ValidationReport {
    pub fn invalid_bind_addr(&mut self, addr: &str) {
        self.error(
            "listener.bind",
            format!("invalid address: {addr}"),
            Some("Use an IPv4 or IPv6 literal such as 0.0.0.0 or ::1.".to_string()),
        );
    }
}

/// Rule slot validation
impl ValidationReport {
    pub fn too_many_slots(&mut self, category: &str, count: usize, max: usize) {
        self.error(
            category,
            format!("{count} slots defined, at most {max} are allowed"),
            None,
        );
    }

    pub fn unknown_mode(&mut self, field: String, mode: &str) {
        self.error(
            field,
            format!("unknown match mode '{mode}'"),
            Some("Valid modes are substring and regex.".to_string()),
        );
    }

    pub fn unknown_color(&mut self, field: String, color: &str) {
        self.error(
            field,
            format!("unknown color '{color}'"),
            Some("Valid colors are none, red, green, blue, orange, purple and gray.".to_string()),
        );
    }

    pub fn invalid_regex_token(&mut self, field: String, token: &str, reason: &str) {
        self.warning(
            field,
            format!("regex token '{token}' does not compile and will be ignored: {reason}"),
            None,
        );
    }

    pub fn color_without_effect(&mut self, field: String) {
        self.warning(field, "color only applies to highlight slots".to_string(), None);
    }
}
