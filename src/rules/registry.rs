//! Rule Registry
//!
//! In-memory registry of rule profiles with one active profile.

use super::schema::{RuleBook, RulesFile};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Name of the embedded profile
pub const DEFAULT_PROFILE: &str = "hindi-story";

/// File suffix for rule profiles on disk
const RULES_FILE_SUFFIX: &str = ".rules.toml";

const EMBEDDED_PROFILE: &str = include_str!("../../resources/rules/hindi-story.rules.toml");

/// Parse a rules file into a runtime profile
pub fn parse_rules_file(content: &str) -> Result<RuleBook> {
    let file: RulesFile = toml::from_str(content).context("invalid rules file")?;
    RuleBook::try_from(file)
}

#[derive(Debug, Clone)]
pub struct RuleRegistry {
    profiles: HashMap<String, RuleBook>,
    active_profile: Option<String>,
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self {
            profiles: HashMap::new(),
            active_profile: None,
        }
    }

    /// Registry with the embedded profile loaded and active
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.add_embedded_profile();
        registry.set_active_profile(DEFAULT_PROFILE);
        registry
    }

    /// Add a profile, replacing any profile with the same name
    pub fn add_profile(&mut self, profile: RuleBook) {
        self.profiles.insert(profile.name.clone(), profile);
    }

    pub fn set_active_profile(&mut self, name: &str) -> bool {
        if self.profiles.contains_key(name) {
            self.active_profile = Some(name.to_string());
            true
        } else {
            false
        }
    }

    pub fn get_active_profile(&self) -> Option<&RuleBook> {
        self.active_profile
            .as_ref()
            .and_then(|name| self.profiles.get(name))
    }

    pub fn get_profile(&self, name: &str) -> Option<&RuleBook> {
        self.profiles.get(name)
    }

    /// List all available profile names, sorted
    pub fn list_profiles(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Add the profile compiled into the binary
    pub fn add_embedded_profile(&mut self) {
        match parse_rules_file(EMBEDDED_PROFILE) {
            Ok(profile) => self.add_profile(profile),
            Err(e) => {
                log::warn!(
                    "Failed to parse embedded rules profile: {:#}. Using minimal fallback.",
                    e
                );
                self.add_profile(RuleBook::hindi_story());
            }
        }
    }

    /// Load every `*.rules.toml` file in `dir`.
    ///
    /// Returns the number of profiles loaded. A missing directory loads nothing;
    /// files that fail to read or parse are logged and skipped.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        if !dir.is_dir() {
            log::debug!("Rules directory {:?} does not exist, skipping", dir);
            return Ok(0);
        }

        let mut paths: Vec<_> = fs::read_dir(dir)
            .with_context(|| format!("failed to read rules directory {:?}", dir))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(RULES_FILE_SUFFIX))
            })
            .collect();
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            match self.load_file(&path) {
                Ok(name) => {
                    log::info!("Loaded rules profile '{}' from {:?}", name, path);
                    loaded += 1;
                }
                Err(e) => log::warn!("Skipping rules file {:?}: {:#}", path, e),
            }
        }

        Ok(loaded)
    }

    /// Load a single rules file, returning the profile name
    pub fn load_file(&mut self, path: &Path) -> Result<String> {
        let content =
            fs::read_to_string(path).with_context(|| format!("failed to read {:?}", path))?;
        let profile = parse_rules_file(&content)?;
        let name = profile.name.clone();
        self.add_profile(profile);
        Ok(name)
    }
}
