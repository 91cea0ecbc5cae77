//! HCL configuration: parsing, command-line overrides and validation.

mod error;
mod loader;
mod overrides;
mod range;
mod report;
mod template;
mod types;
mod validate;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use loader::{DEFAULT_CONFIG_FILE, discover_config, load_config, parse_config, parse_config_str};
pub use overrides::ConfigOverrides;
pub use range::RangeConstraint;
pub use report::{Severity, ValidationIssue, ValidationReport};
pub use template::STARTER_CONFIG;
pub use types::{ConfigSpec, DisplaySpec, ListenerSpec, SessionSpec, SlotSpec};
pub use validate::{ValidatedConfig, ViewerConfig, validate_config, validate_spec};
