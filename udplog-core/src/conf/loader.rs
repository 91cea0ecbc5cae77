use crate::conf::error::ConfigError;
use crate::conf::overrides::ConfigOverrides;
use crate::conf::types::ConfigSpec;
use crate::conf::validate::{ValidatedConfig, validate_config};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "udplog.hcl";

pub fn parse_config_str(source: &str, path: &Path) -> Result<ConfigSpec, ConfigError> {
    hcl::from_str(source).map_err(|e| ConfigError::parse(path, e))
}

pub fn parse_config(path: &Path) -> Result<ConfigSpec, ConfigError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    parse_config_str(&s, path)
}

/// Find the config file to use.
///
/// An explicit path must exist. Without one, `udplog.hcl` in the working
/// directory is used if present; otherwise the built-in defaults apply.
pub fn discover_config(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let candidate = PathBuf::from(DEFAULT_CONFIG_FILE);
            candidate.is_file().then_some(candidate)
        }
    }
}

/// Read, override and validate the configuration.
pub fn load_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<ValidatedConfig, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    let mut spec = match discover_config(path) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            parse_config(&path)?
        }
        None => ConfigSpec::default(),
    };

    overrides.apply(&mut spec);

    //--------------------------------------------------------------------------
    // Semantic validation (aggregate all errors)
    //--------------------------------------------------------------------------
    let (config, report) = validate_config(&spec);
    match config {
        Some(config) if !report.has_errors() => {
            for warning in &report.warnings {
                tracing::warn!(field = %warning.field, "{}", warning.message);
            }
            Ok(ValidatedConfig {
                config,
                spec,
                report,
            })
        }
        _ => Err(ConfigError::Validation { report }),
    }
}
