// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Subscriber setup for the `tracker` binary.
//!
//! Logs go to stderr so table and draft output on stdout stays pipeable.
//! `TRACKER_LOG` overrides `[logging].level` with any `EnvFilter` directive
//! string.

use anyhow::{Result, anyhow};
use std::env;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "TRACKER_LOG";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Single-line human output.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Some(Self::Compact),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directives, such as `warn` or `tracker_table=trace`.
    pub directives: String,
    pub format: LogFormat,
}

impl LogConfig {
    pub fn check_directives(directives: &str) -> Result<()> {
        EnvFilter::try_new(directives)
            .map(|_| ())
            .map_err(|error| anyhow!("invalid log filter {directives:?}: {error}"))
    }

    /// Filter from `TRACKER_LOG` when set and non-empty, else the configured
    /// directives.
    pub fn filter(&self) -> Result<EnvFilter> {
        let directives = match env::var(LOG_ENV_VAR) {
            Ok(value) if !value.trim().is_empty() => value,
            _ => self.directives.clone(),
        };
        EnvFilter::try_new(&directives).map_err(|error| {
            anyhow!("invalid log filter {directives:?}: {error}; fix {LOG_ENV_VAR} or [logging].level")
        })
    }
}

pub fn init_logging(config: &LogConfig) -> Result<()> {
    let filter = config.filter()?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let installed = match config.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|error| anyhow!("install log subscriber: {error}"))
}

#[cfg(test)]
mod tests {
    use super::{LOG_ENV_VAR, LogConfig, LogFormat};
    use anyhow::Result;

    #[test]
    fn formats_parse_case_insensitively() {
        assert_eq!(LogFormat::parse("JSON"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse(" compact "), Some(LogFormat::Compact));
        assert_eq!(LogFormat::parse("pretty"), None);
    }

    #[test]
    fn directives_are_checked() {
        assert!(LogConfig::check_directives("info,tracker_forms=debug").is_ok());
        assert!(LogConfig::check_directives("tracker_forms=loud").is_err());
    }

    #[test]
    fn configured_directives_build_a_filter() -> Result<()> {
        if std::env::var_os(LOG_ENV_VAR).is_some() {
            return Ok(());
        }
        let config = LogConfig {
            directives: "tracker_table=trace".to_owned(),
            format: LogFormat::Compact,
        };
        let filter = config.filter()?;
        assert!(filter.to_string().contains("tracker_table=trace"));
        Ok(())
    }
}
