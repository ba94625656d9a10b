//! @dose
//! purpose: Configuration file parsing for tokenpress.toml. Holds default output formats,
//!     generator naming, output location, publish defaults and flattening limits.
//!
//! when-editing:
//!     - !Config is loaded once at startup and passed through the call chain
//!     - CLI flags always win over values from the file
//!
//! invariants:
//!     - Config::load returns the default config if tokenpress.toml doesn't exist
//!     - A broken config file is reported and ignored, never fatal
//!
//! gotchas:
//!     - Unknown format names in `formats` are skipped with a warning; an empty result means
//!         "all formats"

use crate::formatter::{FlattenLimits, GenerateOptions};
use crate::publish::{DEFAULT_COMMIT_MESSAGE, DEFAULT_DIRECTORY};
use crate::types::Format;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "tokenpress.toml";

/// Main configuration structure matching tokenpress.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Formats generated when none are given on the command line
    pub formats: Vec<String>,

    /// Seed default colors/spacing when a document has none
    pub fallback: bool,

    /// Struct/object/class name in generated code
    pub type_name: String,

    /// Local directory generated files are written to
    pub output_dir: String,

    pub publish: PublishConfig,

    pub limits: LimitsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            formats: Vec::new(),
            fallback: true,
            type_name: GenerateOptions::default().type_name,
            output_dir: DEFAULT_DIRECTORY.to_string(),
            publish: PublishConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

/// Publish defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Repository URL or owner/name
    pub repo: Option<String>,

    /// Target branch (None = repository default branch)
    pub branch: Option<String>,

    pub message: String,

    /// Remote subdirectory
    pub directory: String,

    /// REST API root for GitHub Enterprise (None = api.github.com)
    pub api_base: Option<String>,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            repo: None,
            branch: None,
            message: DEFAULT_COMMIT_MESSAGE.to_string(),
            directory: DEFAULT_DIRECTORY.to_string(),
            api_base: None,
        }
    }
}

/// Limits applied when flattening uploaded JSON
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_depth: usize,
    pub max_entries: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        let limits = FlattenLimits::default();
        Self {
            max_depth: limits.max_depth,
            max_entries: limits.max_entries,
        }
    }
}

impl Config {
    /// Load configuration from tokenpress.toml in the given root directory
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);

        if !config_path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&config_path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", CONFIG_FILE, e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", CONFIG_FILE, e);
                Self::default()
            }
        }
    }

    /// Configured default formats, or all of them
    pub fn default_formats(&self) -> Vec<Format> {
        let formats: Vec<Format> = self
            .formats
            .iter()
            .filter_map(|id| match id.parse::<Format>() {
                Ok(format) => Some(format),
                Err(e) => {
                    tracing::warn!("Ignoring format in {}: {}", CONFIG_FILE, e);
                    None
                }
            })
            .collect();

        if formats.is_empty() {
            Format::ALL.to_vec()
        } else {
            formats
        }
    }

    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            type_name: self.type_name.clone(),
        }
    }

    pub fn flatten_limits(&self) -> FlattenLimits {
        FlattenLimits {
            max_depth: self.limits.max_depth,
            max_entries: self.limits.max_entries,
        }
    }
}
