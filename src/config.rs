//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidValue("LOG_FORMAT")),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the collection files
    pub data_dir: PathBuf,

    /// Environment (development, production)
    pub environment: String,

    /// Log output format
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("BANK_DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        let mut config = Self {
            data_dir,
            environment,
            log_format: LogFormat::Pretty,
        };
        config.log_format = match lookup("LOG_FORMAT") {
            Some(value) => value.parse()?,
            None if config.is_production() => LogFormat::Json,
            None => LogFormat::Pretty,
        };

        Ok(config)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("."));
        assert_eq!(config.environment, "development");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(!config.is_production());
    }

    #[test]
    fn test_production_defaults_to_json() {
        let config = Config::from_lookup(lookup(&[
            ("ENVIRONMENT", "production"),
            ("BANK_DATA_DIR", "/var/lib/bank"),
        ]))
        .unwrap();

        assert!(config.is_production());
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/bank"));
    }

    #[test]
    fn test_invalid_log_format() {
        let result = Config::from_lookup(lookup(&[("LOG_FORMAT", "xml")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue("LOG_FORMAT"))));
    }
}
