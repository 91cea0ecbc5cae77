use crate::conf::{
    ConfigError, ConfigOverrides, ConfigSpec, STARTER_CONFIG, load_config, parse_config,
    parse_config_str,
};
use crate::rules::{MatchMode, SlotColor};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn parse_full_config_file() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("udplog.hcl");
    fs::write(
        &path,
        r#"
listener = {
  bind = "127.0.0.1"
  port = 9999
}

display = {
  max_lines  = 5000
  trim_chunk = 500
  timestamp  = true
}

session = {
  logs_dir = "/tmp/udplog"
}

filters    = [{ pattern = "OVEN;T11", mode = "substring" }]
excludes   = [{ pattern = "DEBUG" }]
highlights = [{ pattern = "ERROR", mode = "regex", color = "red" }]
"#,
    )
    .unwrap();

    // Act
    let spec = parse_config(&path).unwrap();

    // Assert
    assert_eq!(spec.listener.bind, "127.0.0.1");
    assert_eq!(spec.listener.port, 9999);
    assert_eq!(spec.display.max_lines, 5000);
    assert!(spec.display.timestamp);
    assert_eq!(spec.display.flush_batch, 300);
    assert_eq!(spec.session.logs_dir.as_deref(), Some(Path::new("/tmp/udplog")));
    assert_eq!(spec.filters.len(), 1);
    assert_eq!(spec.excludes[0].mode, "");
    assert_eq!(spec.highlights[0].color, "red");
}

#[test]
fn empty_file_means_defaults() {
    // Act
    let spec = parse_config_str("", Path::new("empty.hcl")).unwrap();

    // Assert
    assert_eq!(spec, ConfigSpec::default());
}

#[test]
fn syntax_error_is_a_parse_error() {
    // Act
    let err = parse_config_str("listener = {", Path::new("broken.hcl")).unwrap_err();

    // Assert
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn explicit_missing_file_is_a_read_error() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope.hcl");

    // Act
    let err = load_config(Some(&path), &ConfigOverrides::default()).unwrap_err();

    // Assert
    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn overrides_replace_file_values() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("udplog.hcl");
    fs::write(&path, "listener = {\n  port = 9000\n}\n").unwrap();
    let overrides = ConfigOverrides {
        bind: Some("::1".to_string()),
        port: Some(9100),
        timestamp: Some(true),
        ..ConfigOverrides::default()
    };

    // Act
    let loaded = load_config(Some(&path), &overrides).unwrap();

    // Assert
    assert_eq!(loaded.config.target.to_string(), "::1:9100");
    assert!(loaded.config.timestamp);
}

#[test]
fn invalid_override_is_reported_by_validation() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("udplog.hcl");
    fs::write(&path, "").unwrap();
    let overrides = ConfigOverrides {
        port: Some(70_000),
        ..ConfigOverrides::default()
    };

    // Act
    let err = load_config(Some(&path), &overrides).unwrap_err();

    // Assert
    let ConfigError::Validation { report } = err else {
        panic!("expected validation error");
    };
    assert_eq!(report.errors[0].field, "listener.port");
}

#[test]
fn starter_config_loads_cleanly() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("udplog.hcl");
    fs::write(&path, STARTER_CONFIG).unwrap();

    // Act
    let loaded = load_config(Some(&path), &ConfigOverrides::default()).unwrap();

    // Assert
    assert!(!loaded.report.has_violations());
    assert_eq!(loaded.config.flush_interval, Duration::from_millis(50));
    let first = loaded.config.rules.highlights.slot(0).unwrap();
    assert_eq!(first.pattern, "ERROR");
    assert_eq!(first.mode, MatchMode::Substring);
    assert_eq!(first.color, SlotColor::Red);
}
