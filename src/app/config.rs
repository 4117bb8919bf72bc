//! Application configuration
//!
//! This module turns parsed command-line arguments and the environment into
//! the settings for one run.

use crate::cli::IoArgs;
use std::path::PathBuf;

/// Environment variable holding the tracing filter directive
pub const LOG_ENV_VAR: &str = "RUST_LOG";

/// Filter used when the environment does not set one
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Application configuration structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Input file: a robot log or a simulation trace
    pub protocol: PathBuf,
    /// Output file; standard output when unset
    pub output: Option<PathBuf>,
    /// Tracing filter directive
    pub log_filter: String,
}

impl AppConfig {
    /// Create a configuration for the given input file
    pub fn new(protocol: impl Into<PathBuf>) -> Self {
        Self {
            protocol: protocol.into(),
            output: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    /// Build the configuration from command-line arguments and `RUST_LOG`
    pub fn from_cli(args: &IoArgs) -> Self {
        let config = Self::new(&args.protocol);
        let config = match &args.output {
            Some(path) => config.with_output(path),
            None => config,
        };
        match std::env::var(LOG_ENV_VAR) {
            Ok(filter) if !filter.trim().is_empty() => config.with_log_filter(filter),
            _ => config,
        }
    }

    /// Write rows to a file instead of standard output
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Override the tracing filter
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_stdout_and_warn() {
        let config = AppConfig::new("protocol.log");
        assert_eq!(config.protocol, PathBuf::from("protocol.log"));
        assert!(config.output.is_none());
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_builder_overrides() {
        let config = AppConfig::new("in.log")
            .with_output("out.csv")
            .with_log_filter("otlogging=debug");
        assert_eq!(config.output, Some(PathBuf::from("out.csv")));
        assert_eq!(config.log_filter, "otlogging=debug");
    }

    #[test]
    fn test_from_cli_copies_paths() {
        let args = IoArgs {
            protocol: PathBuf::from("run.log"),
            output: Some(PathBuf::from("map.csv")),
        };
        let config = AppConfig::from_cli(&args);
        assert_eq!(config.protocol, PathBuf::from("run.log"));
        assert_eq!(config.output, Some(PathBuf::from("map.csv")));
    }
}
