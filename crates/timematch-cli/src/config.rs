//! Optional TOML configuration for the `timematch` CLI.
//!
//! ```toml
//! [matching]
//! grouping = "sweep"          # or "start-day"
//! min_duration_minutes = 30
//!
//! [output]
//! format = "text"             # or "json"
//! ```
//!
//! Command-line flags take precedence over file values.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use overlap_engine::{Grouping, MatchOptions};
use serde::Deserialize;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    pub matching: Option<MatchingConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct MatchingConfig {
    pub grouping: Option<Grouping>,
    pub min_duration_minutes: Option<i64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load `path` if given, otherwise use defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Merge file settings with command-line overrides.
    pub fn match_options(
        &self,
        grouping: Option<Grouping>,
        min_duration_minutes: Option<i64>,
    ) -> MatchOptions {
        let matching = self.matching.as_ref();
        MatchOptions {
            grouping: grouping
                .or_else(|| matching.and_then(|m| m.grouping))
                .unwrap_or_default(),
            min_duration_minutes: min_duration_minutes
                .or_else(|| matching.and_then(|m| m.min_duration_minutes))
                .unwrap_or(0),
        }
    }

    pub fn output_format(&self, format: Option<OutputFormat>) -> OutputFormat {
        format
            .or_else(|| self.output.as_ref().and_then(|o| o.format))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.match_options(None, None), MatchOptions::default());
        assert_eq!(config.output_format(None), OutputFormat::Json);
    }

    #[test]
    fn file_values_apply() {
        let config: Config = toml::from_str(
            "[matching]\ngrouping = \"sweep\"\nmin_duration_minutes = 30\n\n[output]\nformat = \"text\"\n",
        )
        .unwrap();
        let options = config.match_options(None, None);
        assert_eq!(options.grouping, Grouping::Sweep);
        assert_eq!(options.min_duration_minutes, 30);
        assert_eq!(config.output_format(None), OutputFormat::Text);
    }

    #[test]
    fn flags_override_file_values() {
        let config: Config =
            toml::from_str("[matching]\ngrouping = \"sweep\"\nmin_duration_minutes = 30\n").unwrap();
        let options = config.match_options(Some(Grouping::StartDay), Some(0));
        assert_eq!(options.grouping, Grouping::StartDay);
        assert_eq!(options.min_duration_minutes, 0);
        assert_eq!(config.output_format(Some(OutputFormat::Text)), OutputFormat::Text);
    }

    #[test]
    fn unknown_grouping_is_rejected() {
        assert!(toml::from_str::<Config>("[matching]\ngrouping = \"nearest\"\n").is_err());
    }
}
