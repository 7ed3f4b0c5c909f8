//! Logging setup
//!
//! Installs a `tracing` subscriber once per process. Everything is written to
//! stderr so stdout carries only the JSON result.

use crate::error::{Result, SpotPriceError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the default log level
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// AWS SDK and HTTP stack crates are noisy at debug; keep them at warn
const QUIET_TARGETS: &[&str] = &[
    "aws_config",
    "aws_runtime",
    "aws_sdk_ec2",
    "aws_smithy_runtime",
    "aws_smithy_runtime_api",
    "hyper",
    "hyper_util",
    "rustls",
];

/// Log verbosity, named the way operators pass it in `LOG_LEVEL`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    #[value(name = "DEBUG")]
    Debug,
    #[default]
    #[value(name = "INFO")]
    Info,
    #[value(name = "WARNING", alias = "WARN")]
    #[serde(alias = "WARN")]
    Warning,
    #[value(name = "ERROR")]
    Error,
    #[value(name = "CRITICAL")]
    Critical,
}

impl LogLevel {
    /// `tracing` has no level above error, so CRITICAL shares it
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }

    /// Level from `LOG_LEVEL`, if set and non-empty
    pub fn from_env() -> Result<Option<Self>> {
        match std::env::var(LOG_LEVEL_ENV) {
            Ok(value) if !value.trim().is_empty() => value.parse().map(Some),
            _ => Ok(None),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for LogLevel {
    type Err = SpotPriceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" => Ok(LogLevel::Critical),
            other => Err(SpotPriceError::validation(
                "loglevel",
                format!(
                    "Log level must be one of DEBUG, INFO, WARNING, ERROR, CRITICAL, got: {}",
                    other
                ),
            )),
        }
    }
}

/// Build the filter for a level, with the SDK crates pinned to warn
pub fn env_filter(level: LogLevel) -> EnvFilter {
    let mut directives = vec![level.as_directive().to_string()];
    directives.extend(QUIET_TARGETS.iter().map(|t| format!("{}=warn", t)));
    EnvFilter::new(directives.join(","))
}

/// Install the global subscriber
///
/// Returns false if a subscriber was already installed (e.g. a second call in tests).
pub fn init_logging(level: LogLevel, json: bool) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_target(false)
        .with_writer(std::io::stderr);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_levels() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("warn".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!(" Critical ".parse::<LogLevel>().unwrap(), LogLevel::Critical);
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_cli_and_event_accept_same_names() {
        use clap::ValueEnum;

        for name in ["DEBUG", "info", "Warning", "warn", "ERROR", "critical"] {
            let from_cli = <LogLevel as ValueEnum>::from_str(name, true).unwrap();
            assert_eq!(from_cli, name.parse::<LogLevel>().unwrap(), "{}", name);
        }
        assert!(<LogLevel as ValueEnum>::from_str("verbose", true).is_err());
    }

    #[test]
    fn test_config_accepts_warn_alias() {
        #[derive(Deserialize)]
        struct Wrapper {
            level: LogLevel,
        }

        let parsed: Wrapper = toml::from_str(r#"level = "WARN""#).unwrap();
        assert_eq!(parsed.level, LogLevel::Warning);
    }

    #[test]
    fn test_critical_maps_to_error() {
        assert_eq!(LogLevel::Critical.as_directive(), "error");
        assert_eq!(LogLevel::Warning.as_directive(), "warn");
    }

    #[test]
    fn test_filter_quiets_sdk() {
        let filter = env_filter(LogLevel::Debug).to_string();
        assert!(filter.contains("aws_sdk_ec2=warn"));
        assert!(filter.contains("debug"));
    }
}
