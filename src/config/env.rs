// src/config/env.rs
// Environment-based configuration - single source of truth for all env vars

use super::file::FileConfig;
use crate::error::{Result, TestRailError};
use crate::http::DEFAULT_TIMEOUT;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Credentials used for HTTP basic auth
#[derive(Clone, Default)]
pub struct Credentials {
    /// Login (TESTRAIL_USERNAME)
    pub username: Option<String>,
    /// API key (TESTRAIL_API_KEY, or TESTRAIL_PASSWORD as a fallback)
    pub api_key: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Credentials {
    pub fn is_complete(&self) -> bool {
        self.username.is_some() && self.api_key.is_some()
    }
}

/// Connection settings with every required value present
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub base_url: String,
    pub username: String,
    pub api_key: String,
    pub timeout: Duration,
}

/// Configuration validation result
#[derive(Debug)]
pub struct ConfigValidation {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl Default for ConfigValidation {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidation {
    pub fn new() -> Self {
        Self {
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Format as a human-readable report
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        if !self.errors.is_empty() {
            lines.push("Errors:".to_string());
            for err in &self.errors {
                lines.push(format!("  - {}", err));
            }
        }

        if !self.warnings.is_empty() {
            lines.push("Warnings:".to_string());
            for warn in &self.warnings {
                lines.push(format!("  - {}", warn));
            }
        }

        if lines.is_empty() {
            "Configuration OK".to_string()
        } else {
            lines.join("\n")
        }
    }
}

/// Environment configuration - all env vars in one place
#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// Instance base URL (TESTRAIL_URL)
    pub base_url: Option<String>,
    pub credentials: Credentials,
    /// Request timeout (TESTRAIL_TIMEOUT_SECS)
    pub timeout: Duration,
}

impl EnvConfig {
    /// Load all configuration (call once at startup). Env vars override the file.
    pub fn load() -> Self {
        info!("Loading environment configuration");
        Self::from_sources(&FileConfig::load(), |name| std::env::var(name).ok())
    }

    /// Merge a parsed config file with an env var lookup
    pub fn from_sources<F>(file: &FileConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let base_url = read("TESTRAIL_URL")
            .or_else(|| file.testrail.url.clone())
            .map(|u| u.trim().trim_end_matches('/').to_string());

        let credentials = Credentials {
            username: read("TESTRAIL_USERNAME").or_else(|| file.testrail.username.clone()),
            api_key: read("TESTRAIL_API_KEY").or_else(|| read("TESTRAIL_PASSWORD")),
        };

        let timeout = match read("TESTRAIL_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    warn!(value = %raw, "Invalid TESTRAIL_TIMEOUT_SECS, using default");
                    None
                }
            },
            None => None,
        }
        .or_else(|| {
            file.http
                .timeout_secs
                .filter(|s| *s > 0)
                .map(Duration::from_secs)
        })
        .unwrap_or(DEFAULT_TIMEOUT);

        debug!(
            base_url = ?base_url,
            has_credentials = credentials.is_complete(),
            timeout_secs = timeout.as_secs(),
            "Configuration resolved"
        );

        Self {
            base_url,
            credentials,
            timeout,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::new();

        match self.base_url.as_deref() {
            None => validation.add_error("TESTRAIL_URL is not set."),
            Some(raw) => match url::Url::parse(raw) {
                Ok(parsed) => {
                    if parsed.scheme() != "https" {
                        validation.add_warning(format!(
                            "TESTRAIL_URL '{}' does not use https; credentials are sent in clear text.",
                            raw
                        ));
                    }
                }
                Err(e) => validation.add_error(format!("TESTRAIL_URL '{}' is not a valid URL: {}", raw, e)),
            },
        }

        if self.credentials.username.is_none() {
            validation.add_error("TESTRAIL_USERNAME is not set.");
        }
        if self.credentials.api_key.is_none() {
            validation.add_error("TESTRAIL_API_KEY is not set.");
        }

        validation
    }

    /// Settings with all required values, or a configuration error naming the gaps
    pub fn resolve(&self) -> Result<ResolvedSettings> {
        let validation = self.validate();
        if !validation.is_valid() {
            return Err(TestRailError::Config(validation.errors.join(" ")));
        }
        match (
            self.base_url.clone(),
            self.credentials.username.clone(),
            self.credentials.api_key.clone(),
        ) {
            (Some(base_url), Some(username), Some(api_key)) => Ok(ResolvedSettings {
                base_url,
                username,
                api_key,
                timeout: self.timeout,
            }),
            _ => Err(TestRailError::Config("incomplete TestRail settings".to_string())),
        }
    }
}
