//! Configuration management for deeplink-page.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::logging;
use crate::options::DeepLinkOptions;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page contents.
    pub page: DeepLinkOptions,
    /// Output settings.
    pub output: OutputSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Output configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// File to write; stdout when absent.
    pub path: Option<PathBuf>,
    /// Validate values before embedding them.
    pub strict: bool,
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Config = serde_json::from_str(&content).map_err(ConfigError::Json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde accepts but the application cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !logging::is_valid_filter(&self.logging.level) {
            return Err(ConfigError::InvalidLogLevel(self.logging.level.clone()));
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_env_from<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let page = &mut self.page;
        let overrides: [(&str, &mut String); 7] = [
            ("DEEPLINK_IOS_APP", &mut page.urls.ios_app),
            ("DEEPLINK_ANDROID_APP", &mut page.urls.android_app),
            ("DEEPLINK_IOS_STORE", &mut page.urls.ios_store),
            ("DEEPLINK_ANDROID_STORE", &mut page.urls.android_store),
            ("DEEPLINK_FALLBACK", &mut page.urls.fallback),
            ("DEEPLINK_PAGE_TITLE", &mut page.page_title),
            ("DEEPLINK_HEADING_TEXT", &mut page.heading_text),
        ];
        for (name, slot) in overrides {
            if let Some(value) = var(name) {
                *slot = value;
            }
        }

        if let Some(path) = var("DEEPLINK_OUTPUT").filter(|p| !p.is_empty()) {
            self.output.path = Some(PathBuf::from(path));
        }

        // Unusable levels are skipped so the file or default level stays in effect.
        let level = var("DEEPLINK_LOG_LEVEL")
            .filter(|l| logging::is_log_level(l))
            .or_else(|| var("RUST_LOG").filter(|l| logging::is_valid_filter(l)));
        if let Some(level) = level {
            self.logging.level = level;
        }
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        let page = &mut self.page;
        let overrides = [
            (&args.ios_app, &mut page.urls.ios_app),
            (&args.android_app, &mut page.urls.android_app),
            (&args.ios_store, &mut page.urls.ios_store),
            (&args.android_store, &mut page.urls.android_store),
            (&args.fallback, &mut page.urls.fallback),
            (&args.title, &mut page.page_title),
            (&args.heading, &mut page.heading_text),
        ];
        for (value, slot) in overrides {
            if let Some(value) = value {
                slot.clone_from(value);
            }
        }

        if let Some(ref path) = args.output {
            self.output.path = Some(path.clone());
        }

        if args.strict {
            self.output.strict = true;
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match args.config {
            Some(ref path) => Config::from_file(path)?,
            None => Config::default(),
        };

        config.apply_env();
        config.apply_args(args);

        Ok(config)
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
    /// Log level is neither a level name nor a `target=level` filter.
    InvalidLogLevel(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
            Self::InvalidLogLevel(level) => write!(f, "invalid log level: {}", level),
        }
    }
}

impl std::error::Error for ConfigError {}
