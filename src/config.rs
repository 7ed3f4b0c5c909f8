use crate::error::{ConfigError, Result};
use crate::logging::LogLevel;
use crate::region::RegionCatalogSource;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub aws: AwsConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AwsConfig {
    /// Region used when no zone hint resolves one (defaults to the SDK chain)
    pub region: Option<String>,
    #[serde(default)]
    pub region_catalog: RegionCatalogSource,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FetchConfig {
    /// Overall deadline for one lookup, all pages included
    pub deadline_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    pub level: Option<LogLevel>,
    #[serde(default)]
    pub json: bool,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            // Try .spotprice.toml in current dir, then ~/.config/spotprice/config.toml
            let local = PathBuf::from(".spotprice.toml");
            if local.exists() {
                local
            } else {
                dirs::config_dir()
                    .map(|d| d.join("spotprice").join("config.toml"))
                    .unwrap_or(local)
            }
        };

        if !config_path.exists() {
            // Use defaults but warn if user explicitly provided a path
            if path.is_some() {
                eprintln!("WARNING: Config file not found: {}", config_path.display());
                eprintln!("   Using default configuration. Run 'spotprice --init-config <PATH>' to create one.");
            }
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| {
            ConfigError::ParseError(format!("{}: {}", config_path.display(), e))
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            ConfigError::ParseError(format!("{}: {}", config_path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(region) = &self.aws.region {
            if region.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "aws.region".to_string(),
                    reason: "region cannot be empty (omit it to use the SDK default)".to_string(),
                }
                .into());
            }
        }

        if self.fetch.deadline_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "fetch.deadline_secs".to_string(),
                reason: "deadline must be at least 1 second".to_string(),
            }
            .into());
        }

        Ok(())
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.fetch.deadline_secs.map(Duration::from_secs)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

pub fn init_config(output: &Path) -> anyhow::Result<()> {
    let config = Config::default();
    config.save(output)?;
    println!("Created config file: {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml(
            r#"
            [aws]
            region = "eu-west-1"
            region_catalog = "discover"

            [fetch]
            deadline_secs = 30

            [logging]
            level = "DEBUG"
            json = true
            "#,
        )
        .unwrap();

        assert_eq!(config.aws.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.aws.region_catalog, RegionCatalogSource::Discover);
        assert_eq!(config.deadline(), Some(Duration::from_secs(30)));
        assert_eq!(config.logging.level, Some(LogLevel::Debug));
        assert!(config.logging.json);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_zero_deadline_rejected() {
        assert!(Config::from_toml("[fetch]\ndeadline_secs = 0\n").is_err());
    }
}
