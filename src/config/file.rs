// src/config/file.rs
// File-based configuration from ~/.testrail-mcp/config.toml

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Top-level config structure
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct FileConfig {
    #[serde(default)]
    pub testrail: TestRailFileSection,
    #[serde(default)]
    pub http: HttpFileSection,
}

/// `[testrail]` section. The API key is deliberately not accepted here.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct TestRailFileSection {
    /// Instance base URL, e.g. https://example.testrail.io
    pub url: Option<String>,
    /// Login used for basic auth
    pub username: Option<String>,
}

/// `[http]` section
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct HttpFileSection {
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Load config from ~/.testrail-mcp/config.toml
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load config from an explicit path, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded config from file");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse config file");
                    Self::default()
                }
            },
            Err(_) => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            }
        }
    }

    /// Directory holding config.toml and the optional .env
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".testrail-mcp")
    }

    /// Get the config file path
    fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }
}
