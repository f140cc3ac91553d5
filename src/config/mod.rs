//
//  bitbucket-lite
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Defaults for the `bbl` binary, loaded from a TOML file in the
//! platform-specific config directory:
//!
//! - **Linux**: `~/.config/bbl/config.toml`
//! - **macOS**: `~/Library/Application Support/bbl/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\bbl\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! workspace = "acme"
//! username = "me@acme.io"
//! timeout_secs = 30
//! pagelen = 50
//! ```
//!
//! Command-line flags and environment variables take precedence over the
//! file. The API token is never written to it; it comes from `--token` or
//! `BITBUCKET_API_TOKEN`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Persistent defaults for the CLI.
///
/// Every field is optional; a missing file behaves like an empty one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Workspace used when `--workspace` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,

    /// Atlassian account email used with the API token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// API root, for proxies. Defaults to `https://api.bitbucket.org/2.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Page size requested from list endpoints unless a `pagelen` filter is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagelen: Option<u32>,
}

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// Without a config directory (no `HOME`, for instance) the file cannot
    /// exist, so defaults are returned.
    pub fn load() -> Result<Self> {
        Self::load_optional(Self::default_path().as_deref())
    }

    fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                debug!("no config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Loads the configuration from `path`, returning defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        Self::default_path().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", crate::APP_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
