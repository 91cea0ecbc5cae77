use crate::conf::{ConfigError, ConfigOverrides, STARTER_CONFIG, load_config};
use anyhow::{Result, bail};
use clap::Subcommand;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate configuration and exit
    Check {
        /// Path to config file
        #[arg(default_value = "udplog.hcl")]
        path: PathBuf,

        /// Print issues without colors
        #[arg(short, long, default_value = "false")]
        plain: bool,
    },

    /// Print resolved configuration
    Dump {
        #[arg(default_value = "udplog.hcl")]
        path: PathBuf,

        /// Output as JSON
        #[arg(long, conflicts_with = "yaml")]
        json: bool,

        /// Output as YAML
        #[arg(long)]
        yaml: bool,
    },

    /// Write a commented starter config
    Init {
        /// Path to config file
        #[arg(default_value = "udplog.hcl")]
        path: PathBuf,
    },
}

pub fn run(cmd: ConfigCmd) -> Result<()> {
    match cmd {
        ConfigCmd::Check { path, plain } => check(&path, plain),
        ConfigCmd::Dump { path, yaml, .. } => dump(&path, DumpFormat::from_flags(yaml)),
        ConfigCmd::Init { path } => init(&path),
    }
}

pub fn init(path: &Path) -> Result<()> {
    // Refuse to overwrite an existing file
    if path.exists() {
        bail!("{} already exists", path.display());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, STARTER_CONFIG)?;

    println!("✔ Initialized udplog config in {}", path.display());
    println!();
    println!("Next steps:");
    println!("  udplog config check {}", path.display());
    println!("  udplog listen --config {}", path.display());

    Ok(())
}

pub fn check(path: &Path, plain: bool) -> Result<()> {
    match load_config(Some(path), &ConfigOverrides::default()) {
        Ok(loaded) => {
            let cfg = &loaded.config;
            println!("✔ Config loaded successfully");
            println!("✔ listener {}", cfg.target);
            println!("✔ {} filter slots", cfg.rules.filters.active_count());
            println!("✔ {} exclude slots", cfg.rules.excludes.active_count());
            println!("✔ {} highlight slots", cfg.rules.highlights.active_count());
            println!("✔ max {} visible lines", cfg.max_lines);

            if loaded.report.has_violations() {
                println!();
                print_report(&loaded.report, plain);
            }
            Ok(())
        }
        Err(ConfigError::Validation { report }) => {
            print_report(&report, plain);
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

fn print_report(report: &crate::conf::ValidationReport, plain: bool) {
    if plain {
        eprint!("{}", report.render_plain());
    } else {
        eprint!("{}", report.render_pretty());
    }
}

/// Output format of `config dump`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpFormat {
    Json,
    Yaml,
}

impl DumpFormat {
    /// JSON unless `--yaml` is given; clap keeps the two flags exclusive.
    pub fn from_flags(yaml: bool) -> Self {
        if yaml { Self::Yaml } else { Self::Json }
    }
}

pub fn dump(path: &Path, format: DumpFormat) -> Result<()> {
    let loaded = load_config(Some(path), &ConfigOverrides::default())?;
    println!("{}", render_dump(&loaded.spec, format)?);
    Ok(())
}

pub fn render_dump<T: Serialize>(value: &T, format: DumpFormat) -> Result<String> {
    let s = match format {
        DumpFormat::Json => serde_json::to_string_pretty(value)?,
        DumpFormat::Yaml => serde_yaml::to_string(value)?,
    };
    Ok(s)
}
