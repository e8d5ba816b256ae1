//! Extraction run configuration
//!
//! Settings load from environment variables with sensible defaults and can be
//! overridden programmatically or from CLI flags.
//!
//! # Environment Variables
//!
//! - `MOJOSCAN_ENCODING`: source file encoding label - default: "UTF-8"
//! - `MOJOSCAN_LOG_LEVEL`: logging level - default: "info"
//! - `MOJOSCAN_MAX_FILES`: file limit per run - default: "10000"
//! - `MOJOSCAN_MAX_DEPTH`: directory recursion limit - default: "32"

use encoding_rs::Encoding;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_ENCODING: &str = "UTF-8";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_MAX_FILES: usize = 10_000;
const DEFAULT_MAX_DEPTH: usize = 32;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The encoding label is not a known character encoding
    #[error("Unknown encoding label: {0}")]
    UnknownEncoding(String),

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Settings for one extraction run
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Source-root directories to scan, in priority order
    pub source_roots: Vec<PathBuf>,

    /// Character encoding label for reading source files
    pub encoding: String,

    /// Goal prefix stamped onto descriptors, passed through untouched
    pub goal_prefix: Option<String>,

    /// Owning plugin artifact id, passed through untouched
    pub artifact_id: Option<String>,

    /// Hard limit on scanned files per run
    pub max_files: usize,

    /// Directory recursion limit
    pub max_depth: usize,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ExtractConfig {
    /// Loads from environment variables, falling back to documented defaults
    fn default() -> Self {
        Self {
            source_roots: Vec::new(),
            encoding: env::var("MOJOSCAN_ENCODING")
                .unwrap_or_else(|_| DEFAULT_ENCODING.to_string()),
            goal_prefix: None,
            artifact_id: None,
            max_files: parse_env_usize("MOJOSCAN_MAX_FILES", DEFAULT_MAX_FILES),
            max_depth: parse_env_usize("MOJOSCAN_MAX_DEPTH", DEFAULT_MAX_DEPTH),
            log_level: env::var("MOJOSCAN_LOG_LEVEL")
                .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}

impl ExtractConfig {
    pub fn with_roots(roots: Vec<PathBuf>) -> Self {
        Self {
            source_roots: roots,
            ..Self::default()
        }
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    pub fn with_goal_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.goal_prefix = Some(prefix.into());
        self
    }

    pub fn with_artifact_id(mut self, artifact_id: impl Into<String>) -> Self {
        self.artifact_id = Some(artifact_id.into());
        self
    }

    /// Resolve the configured encoding label
    pub fn resolved_encoding(&self) -> Result<&'static Encoding, ConfigError> {
        Encoding::for_label(self.encoding.as_bytes())
            .ok_or_else(|| ConfigError::UnknownEncoding(self.encoding.clone()))
    }

    /// Check the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolved_encoding()?;
        if self.max_files == 0 {
            return Err(ConfigError::ValidationFailed(
                "max_files must be greater than zero".to_string(),
            ));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ValidationFailed(
                "max_depth must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_env_usize(var: &str, default: usize) -> usize {
    match env::var(var) {
        Ok(text) => text.parse().unwrap_or(default),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractConfig::with_roots(vec![]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_encoding_rejected() {
        let config = ExtractConfig::with_roots(vec![]).with_encoding("KLINGON-8");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownEncoding(_))
        ));
    }

    #[test]
    fn test_latin1_label_resolves() {
        let config = ExtractConfig::with_roots(vec![]).with_encoding("ISO-8859-1");
        assert!(config.resolved_encoding().is_ok());
    }

    #[test]
    fn test_builder_passthrough_fields() {
        let config = ExtractConfig::with_roots(vec![])
            .with_goal_prefix("test")
            .with_artifact_id("maven-unit-plugin");
        assert_eq!(config.goal_prefix.as_deref(), Some("test"));
        assert_eq!(config.artifact_id.as_deref(), Some("maven-unit-plugin"));
    }

    #[test]
    fn test_zero_max_files_rejected() {
        let mut config = ExtractConfig::with_roots(vec![]);
        config.max_files = 0;
        assert!(config.validate().is_err());
    }
}
