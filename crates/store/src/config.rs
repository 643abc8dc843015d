// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logging configuration.
//!
//! Loaded from a TOML file with a `[logging]` table. A missing or
//! malformed file falls back to the built-in defaults rather than failing
//! startup; the fallback is logged once.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level config file shape: everything lives under `[logging]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    logging: LoggingConfig,
}

/// Activity logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub log_directory: PathBuf,
    pub capture: CaptureFlags,
    pub privacy: PrivacyConfig,
}

/// Which optional fields to populate on each entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureFlags {
    pub user_prompts: bool,
    pub agent_responses: bool,
    pub tool_invocations: bool,
    pub decision_points: bool,
    pub token_usage: bool,
    pub errors: bool,
    pub duration: bool,
    pub context_files: bool,
}

/// Best-effort redaction settings.
///
/// Pattern-based scrubbing of sensitive-looking `key: value` pairs before
/// storage. Not a security boundary: a value that doesn't match the
/// configured patterns is stored as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacyConfig {
    pub sanitize_sensitive_data: bool,
    /// Key-name patterns whose values get redacted
    pub exclude_patterns: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_directory: PathBuf::from("logs/raw"),
            capture: CaptureFlags::default(),
            privacy: PrivacyConfig::default(),
        }
    }
}

impl Default for CaptureFlags {
    fn default() -> Self {
        Self {
            user_prompts: true,
            agent_responses: true,
            tool_invocations: true,
            decision_points: true,
            token_usage: true,
            errors: true,
            duration: true,
            context_files: true,
        }
    }
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self {
            sanitize_sensitive_data: true,
            exclude_patterns: vec![
                "API_KEY".to_string(),
                "PASSWORD".to_string(),
                "SECRET".to_string(),
                "TOKEN".to_string(),
            ],
        }
    }
}

impl LoggingConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&contents)?;
        Ok(file.logging)
    }

    /// Load configuration, falling back to defaults when the file is
    /// missing or malformed. The fallback is logged once at startup.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to load logging config, using defaults"
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
