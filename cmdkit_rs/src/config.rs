//! Program-level configuration.
//!
//! Values come from [`crate::cli::ProgramBuilder`] setters and can be
//! overridden by an optional TOML file loaded once at startup.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::DEFAULT_CATEGORY;

/// Program configuration
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramConfig {
    /// Name shown in usage lines (`Usage: <prog_name> <command> [options]`)
    pub prog_name: Option<String>,
    /// Banner printed above the command listing
    pub usage: Option<String>,
    /// Version string printed after listings and help
    pub version: Option<String>,
    /// Category for commands that do not declare one
    pub default_category: Option<String>,
}

impl ProgramConfig {
    pub fn default_category(&self) -> &str {
        self.default_category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    /// Load config from a specific path.
    /// Returns default config if the file doesn't exist or is invalid.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to parse config");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read config");
                Self::default()
            }
        }
    }

    /// Replace every field that `other` sets.
    pub fn overlay(&mut self, other: ProgramConfig) {
        if other.prog_name.is_some() {
            self.prog_name = other.prog_name;
        }
        if other.usage.is_some() {
            self.usage = other.usage;
        }
        if other.version.is_some() {
            self.version = other.version;
        }
        if other.default_category.is_some() {
            self.default_category = other.default_category;
        }
    }
}
