//! Configuration management for `relink.toml`.
//!
//! The config file is optional; defaults cover the common layout (a `docs`
//! tree rewritten root-relative, no fallback). CLI arguments always win over
//! file values.
//!
//! ```toml
//! root = "docs"
//!
//! [rewrite]
//! mode = "root"        # "root" | "document"
//! fallback = false
//!
//! [audit]
//! warn_only = false
//! ```

mod error;

pub use error::ConfigError;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, Commands};
use crate::core::RewriteMode;
use crate::log;

/// Root configuration structure representing relink.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory all references must resolve within.
    pub root: PathBuf,

    /// Rewrite pass settings.
    pub rewrite: RewriteConfig,

    /// Audit pass settings.
    pub audit: AuditConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("docs"),
            rewrite: RewriteConfig::default(),
            audit: AuditConfig::default(),
        }
    }
}

/// `[rewrite]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Anchor for rewritten references.
    pub mode: RewriteMode,

    /// Enable the basename rescue search under the root.
    pub fallback: bool,
}

/// `[audit]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Report broken links without failing the run.
    pub warn_only: bool,
}

impl Config {
    /// Load configuration, merging file values with CLI overrides.
    ///
    /// A missing config file is not an error; defaults apply.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = if cli.config.is_file() {
            Self::from_path(&cli.config)?
        } else {
            Self::default()
        };
        config.apply_cli(cli);
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("config"; "ignoring unknown fields in {}:", display_path);
        for field in fields {
            log!("config"; "- {}", field);
        }
    }

    /// Fold command-line arguments over the file values.
    fn apply_cli(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Rewrite { args } => {
                if let Some(root) = &args.root {
                    self.root = root.clone();
                }
                if let Some(mode) = args.mode {
                    self.rewrite.mode = mode;
                }
                if args.fallback {
                    self.rewrite.fallback = true;
                }
            }
            Commands::Audit { args } => {
                if let Some(root) = &args.root {
                    self.root = root.clone();
                }
                if args.warn_only {
                    self.audit.warn_only = true;
                }
            }
        }
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }
}
