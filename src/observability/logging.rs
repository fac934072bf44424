//! Structured logging configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the log filter directive.
pub const LOG_FILTER_ENV: &str = "BARILLET_LOG";

/// Environment variable selecting the log format.
pub const LOG_FORMAT_ENV: &str = "BARILLET_LOG_FORMAT";

/// Filter used when neither `BARILLET_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "barillet=info";

const VERBOSE_FILTER: &str = "barillet=debug";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Parses a format name, case-insensitively.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive.
    pub filter: String,
    /// Output format.
    pub format: LogFormat,
    /// Append logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::Pretty,
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Applies the environment on top of this configuration.
    ///
    /// `verbose` raises the default filter to `debug`. An explicit
    /// `BARILLET_LOG` or `RUST_LOG` always wins.
    #[must_use]
    pub fn with_env_overrides(self, verbose: bool) -> Self {
        self.with_overrides_from(verbose, |key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, verbose: bool, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if verbose && self.filter == DEFAULT_FILTER {
            self.filter = VERBOSE_FILTER.to_string();
        }
        if let Some(filter) = lookup(LOG_FILTER_ENV).or_else(|| lookup("RUST_LOG")) {
            self.filter = filter;
        }
        if let Some(format) = lookup(LOG_FORMAT_ENV).as_deref().and_then(LogFormat::parse) {
            self.format = format;
        }
        self
    }

    /// Sets the log file.
    #[must_use]
    pub fn with_file(mut self, file: Option<PathBuf>) -> Self {
        self.file = file;
        self
    }

    /// Sets the format.
    #[must_use]
    pub const fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("JSON"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse(" pretty "), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse("xml"), None);
    }

    #[test]
    fn test_builders() {
        let config = LoggingConfig::default()
            .with_format(LogFormat::Json)
            .with_file(Some(PathBuf::from("/tmp/barillet.log")));
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.filter, DEFAULT_FILTER);
        assert!(config.file.is_some());
    }

    #[test]
    fn test_overrides() {
        let verbose = LoggingConfig::default().with_overrides_from(true, |_| None);
        assert_eq!(verbose.filter, VERBOSE_FILTER);

        let custom = LoggingConfig {
            filter: "barillet=warn".into(),
            ..LoggingConfig::default()
        };
        assert_eq!(custom.with_overrides_from(true, |_| None).filter, "barillet=warn");

        let from_env = LoggingConfig::default().with_overrides_from(true, |key| match key {
            "RUST_LOG" => Some("trace".into()),
            LOG_FORMAT_ENV => Some("json".into()),
            _ => None,
        });
        assert_eq!(from_env.filter, "trace");
        assert_eq!(from_env.format, LogFormat::Json);
    }
}
