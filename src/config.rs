//! Configuration management for the story language server.
//!
//! Handles:
//! - Command-line argument parsing
//! - Rule profile directory configuration

use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::debounce::DEFAULT_WINDOW;
use crate::rules::{RuleRegistry, DEFAULT_PROFILE};

/// Command-line arguments for the story language server
#[derive(Debug, Parser)]
#[command(name = "kahani-ls")]
#[command(about = "Language server for Hindi story submissions")]
#[command(version)]
pub struct Args {
    /// Rule profile to validate with
    #[arg(long, help = "Rule profile to use (e.g., 'hindi-story')")]
    pub rules: Option<String>,

    /// Extra directory to search for rule profiles
    #[arg(long, help = "Directory containing *.rules.toml files")]
    pub rules_dir: Option<PathBuf>,

    /// Log level for the language server
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,

    /// Quiet period before re-validating an edited document
    #[arg(long, default_value_t = DEFAULT_WINDOW.as_millis() as u64)]
    pub debounce_ms: u64,

    /// Story endpoint shown in submission reports
    #[arg(long, help = "Story endpoint URL")]
    pub endpoint: Option<String>,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Profile name explicitly set via command line
    pub cli_rules: Option<String>,
    /// Rule directories to search, lowest priority first
    pub rules_dirs: Vec<PathBuf>,
    pub log_level: String,
    pub debounce: Duration,
    pub endpoint: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cli_rules: None,
            rules_dirs: Vec::new(),
            log_level: "info".to_string(),
            debounce: DEFAULT_WINDOW,
            endpoint: None,
        }
    }
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        Ok(Config {
            cli_rules: args.rules,
            rules_dirs: collect_rules_dirs(args.rules_dir)?,
            log_level: args.log_level,
            debounce: Duration::from_millis(args.debounce_ms),
            endpoint: args.endpoint,
        })
    }

    /// Profile to activate: CLI choice or the embedded default
    pub fn get_effective_profile(&self) -> String {
        self.cli_rules
            .clone()
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
    }

    /// Build the rule registry: embedded profile, then every configured directory
    pub fn load_rules(&self) -> Result<RuleRegistry> {
        let mut registry = RuleRegistry::new();
        registry.add_embedded_profile();

        for dir in &self.rules_dirs {
            registry.load_dir(dir)?;
        }

        let profile = self.get_effective_profile();
        if !registry.set_active_profile(&profile) {
            bail!(
                "unknown rule profile '{}' (available: {})",
                profile,
                registry.list_profiles().join(", ")
            );
        }
        log::info!("Using rule profile '{}'", profile);

        Ok(registry)
    }

    /// Initialise `env_logger` with the configured filter, writing to stderr
    pub fn init_logging(&self) {
        let _ = env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .target(env_logger::Target::Stderr)
            .try_init();
    }
}

/// Rule directories in loading order: user config directory, then `custom`
pub fn collect_rules_dirs(custom: Option<PathBuf>) -> Result<Vec<PathBuf>> {
    let mut rules_dirs = Vec::new();

    if let Some(config_dir) = dirs::config_dir() {
        rules_dirs.push(config_dir.join("kahani-ls").join("rules"));
    }

    if let Some(custom_dir) = custom {
        if custom_dir.exists() && !custom_dir.is_dir() {
            bail!("--rules-dir {:?} is not a directory", custom_dir);
        }
        rules_dirs.push(custom_dir);
    }

    Ok(rules_dirs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_args() {
        let args = Args::parse_from(["kahani-ls"]);
        let config = Config::from_args(args).unwrap();

        assert_eq!(config.get_effective_profile(), DEFAULT_PROFILE);
        assert_eq!(config.debounce, DEFAULT_WINDOW);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_cli_overrides() {
        let args = Args::parse_from([
            "kahani-ls",
            "--rules",
            "custom",
            "--rules-dir",
            "/nonexistent/kahani-rules",
            "--debounce-ms",
            "50",
        ]);
        let config = Config::from_args(args).unwrap();

        assert_eq!(config.get_effective_profile(), "custom");
        assert_eq!(config.debounce, Duration::from_millis(50));
        assert_eq!(
            config.rules_dirs.last(),
            Some(&PathBuf::from("/nonexistent/kahani-rules"))
        );
    }

    #[test]
    fn test_load_rules_default_profile() {
        let registry = Config::default().load_rules().unwrap();
        assert_eq!(registry.get_active_profile().unwrap().name, DEFAULT_PROFILE);
    }

    #[test]
    fn test_load_rules_unknown_profile() {
        let config = Config {
            cli_rules: Some("missing".to_string()),
            ..Config::default()
        };
        let err = config.load_rules().unwrap_err();
        assert!(err.to_string().contains("missing"));
    }
}
